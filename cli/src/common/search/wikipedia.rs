//! Wikipedia provider: keyword search, then the summary of the top hit.
//!
//! File: cli/src/common/search/wikipedia.rs
//! Author: Christi Mahu

use super::{SearchProvider, SearchResult};
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const PROVIDER: &str = "wikipedia";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: Option<String>,
}

pub struct WikipediaProvider {
    client: reqwest::Client,
    search_url: String,
    summary_url: String,
}

impl WikipediaProvider {
    pub fn new(client: reqwest::Client, search_url: &str, summary_url: &str) -> Self {
        Self {
            client,
            search_url: search_url.to_string(),
            summary_url: summary_url.trim_end_matches('/').to_string(),
        }
    }

    async fn top_title(&self, term: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", term),
                ("format", "json"),
                ("origin", "*"),
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
        let body: SearchResponse = response
            .json()
            .await
            .context("Failed to decode Wikipedia search response")?;

        Ok(body
            .query
            .and_then(|q| q.search.into_iter().next())
            .map(|hit| hit.title))
    }

    async fn summary(&self, title: &str) -> Result<Option<String>> {
        let url = format!("{}/{}", self.summary_url, encode_title(title));
        let response = self
            .client
            .get(&url)
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
        let body: SummaryResponse = response
            .json()
            .await
            .context("Failed to decode Wikipedia summary response")?;

        Ok(body.extract.filter(|text| !text.is_empty()))
    }
}

#[async_trait]
impl SearchProvider for WikipediaProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn lookup(&self, term: &str) -> Result<Option<SearchResult>> {
        let Some(title) = self.top_title(term).await? else {
            return Ok(None);
        };
        debug!("Wikipedia top article for '{}': {}", term, title);

        Ok(self.summary(&title).await?.map(|extract| SearchResult {
            snippet: extract,
            source_label: "Wikipedia".to_string(),
        }))
    }
}

/// Percent-encodes a page title the way browsers' `encodeURIComponent` does:
/// `( ) ! * '` stay literal.
fn encode_title(title: &str) -> String {
    urlencoding::encode(title)
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
}
