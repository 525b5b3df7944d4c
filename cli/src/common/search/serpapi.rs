//! SerpAPI provider (Google results).
//!
//! File: cli/src/common/search/serpapi.rs
//! Author: Christi Mahu
//!
//! The first organic result is preferred. When there is none, the knowledge
//! graph description (or its title) is used instead.

use super::{SearchProvider, SearchResult};
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;

const PROVIDER: &str = "serpapi";

#[derive(Debug, Default, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    knowledge_graph: Option<KnowledgeGraph>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeGraph {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl SerpResponse {
    fn into_result(self) -> Option<SearchResult> {
        if let Some(first) = self.organic_results.into_iter().next() {
            if let Some(snippet) = non_empty(first.snippet) {
                return Some(SearchResult {
                    snippet,
                    source_label: non_empty(first.source).unwrap_or_else(|| "Google".to_string()),
                });
            }
        }
        let kg = self.knowledge_graph?;
        non_empty(kg.description)
            .or_else(|| non_empty(kg.title))
            .map(|snippet| SearchResult {
                snippet,
                source_label: "Google Knowledge Graph".to_string(),
            })
    }
}

pub struct SerpApiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SerpApiProvider {
    pub fn new(client: reqwest::Client, endpoint: &str, api_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn lookup(&self, term: &str) -> Result<Option<SearchResult>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", term),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| anyhow!(ChatError::Http { source: e }))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(ChatError::ProviderStatus {
                provider: PROVIDER.into(),
                status: status.as_u16(),
            }));
        }
        let body: SerpResponse = response
            .json()
            .await
            .context("Failed to decode SerpAPI response")?;
        Ok(body.into_result())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::spawn_fake_server;
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn parse(value: serde_json::Value) -> Option<SearchResult> {
        serde_json::from_value::<SerpResponse>(value)
            .expect("valid SerpAPI shape")
            .into_result()
    }

    #[test]
    fn test_organic_result_preferred() {
        let result = parse(json!({
            "organic_results": [
                { "snippet": "Comets are icy bodies.", "source": "NASA" },
                { "snippet": "ignored", "source": "Other" }
            ],
            "knowledge_graph": { "title": "Comet", "description": "kg text" }
        }));
        assert_eq!(
            result,
            Some(SearchResult {
                snippet: "Comets are icy bodies.".into(),
                source_label: "NASA".into(),
            })
        );
    }

    #[test]
    fn test_knowledge_graph_fallback() {
        let result = parse(json!({
            "organic_results": [],
            "knowledge_graph": { "title": "Comet", "description": "An icy body." }
        }))
        .unwrap();
        assert_eq!(result.snippet, "An icy body.");
        assert_eq!(result.source_label, "Google Knowledge Graph");

        let title_only = parse(json!({ "knowledge_graph": { "title": "Comet" } })).unwrap();
        assert_eq!(title_only.snippet, "Comet");
    }

    #[test]
    fn test_organic_without_snippet_falls_back() {
        let result = parse(json!({
            "organic_results": [{ "source": "NASA" }],
            "knowledge_graph": { "description": "An icy body." }
        }))
        .unwrap();
        assert_eq!(result.source_label, "Google Knowledge Graph");
    }

    #[test]
    fn test_nothing_usable() {
        assert_eq!(parse(json!({})), None);
        assert_eq!(parse(json!({ "knowledge_graph": {} })), None);
    }

    #[tokio::test]
    async fn test_lookup_sends_query_and_key() -> Result<()> {
        let router = Router::new().route(
            "/search.json",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("engine").map(String::as_str) != Some("google")
                    || params.get("api_key").map(String::as_str) != Some("demo")
                {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                let q = params.get("q").cloned().unwrap_or_default();
                (
                    StatusCode::OK,
                    Json(json!({
                        "organic_results": [{ "snippet": format!("About {q}"), "source": "Example" }]
                    })),
                )
            }),
        );
        let base = spawn_fake_server(router).await;
        let provider = SerpApiProvider::new(
            reqwest::Client::new(),
            &format!("{base}/search.json"),
            "demo",
        );

        let result = provider.lookup("halley comet").await?.unwrap();
        assert_eq!(result.snippet, "About halley comet");
        assert_eq!(result.source_label, "Example");
        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_rejected_key_is_error() {
        let router = Router::new().route(
            "/search.json",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid API key" }))) }),
        );
        let base = spawn_fake_server(router).await;
        let provider =
            SerpApiProvider::new(reqwest::Client::new(), &format!("{base}/search.json"), "bad");
        assert!(provider.lookup("x").await.is_err());
    }
}
