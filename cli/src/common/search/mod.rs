//! # chatrs Web Search Fallback (`common::search`)
//!
//! File: cli/src/common/search/mod.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! When the responder has no answer, the message is turned into a search
//! term and handed to a chain of external providers. Providers are asked
//! one after the other; the first usable result is formatted as
//!
//! ```text
//! Based on web search: {snippet}
//!
//! Source: {source}
//! ```
//!
//! A provider that errors (transport, HTTP status, malformed JSON) is logged
//! and skipped, so errors never reach the caller. If every provider comes up
//! empty, a canned "no detailed results" message naming the term is returned.
//!
//! ## Providers
//!
//! - `wikipedia`: keyword search, then a summary of the top article
//! - `serpapi`: organic result snippet, falling back to the knowledge graph
//!
use crate::common::responder::extract_search_term;
use crate::core::config::SearchConfig;
use crate::core::error::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub mod serpapi;
pub mod wikipedia;

pub use serpapi::SerpApiProvider;
pub use wikipedia::WikipediaProvider;

/// A snippet of text and the label of where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub snippet: String,
    pub source_label: String,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Based on web search: {}\n\nSource: {}",
            self.snippet, self.source_label
        )
    }
}

/// An external search backend.
///
/// `Ok(None)` means the provider answered but had nothing usable.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn lookup(&self, term: &str) -> Result<Option<SearchResult>>;
}

/// Message used when no provider produced a result.
pub fn no_results_message(term: &str) -> String {
    format!(
        "I searched for information about \"{}\" but couldn't find detailed results. This might be a specialized topic or require more specific terms.",
        term
    )
}

/// Ordered chain of search providers.
pub struct FallbackSearch {
    providers: Vec<Box<dyn SearchProvider>>,
}

impl fmt::Debug for FallbackSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("FallbackSearch")
            .field("providers", &names)
            .finish()
    }
}

impl FallbackSearch {
    pub fn new(providers: Vec<Box<dyn SearchProvider>>) -> Self {
        Self { providers }
    }

    /// A chain with no providers. `search` always returns `None`.
    pub fn disabled() -> Self {
        Self::new(Vec::new())
    }

    /// Builds the Wikipedia → SerpAPI chain described by `config`.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        if !config.enabled {
            info!("Web search fallback disabled by configuration.");
            return Ok(Self::disabled());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        let mut providers: Vec<Box<dyn SearchProvider>> = Vec::new();
        if config.wikipedia.enabled {
            providers.push(Box::new(WikipediaProvider::new(
                client.clone(),
                &config.wikipedia.search_url,
                &config.wikipedia.summary_url,
            )));
        }
        if config.serpapi.enabled {
            providers.push(Box::new(SerpApiProvider::new(
                client,
                &config.serpapi.endpoint,
                &config.serpapi.api_key,
            )));
        }
        let search = Self::new(providers);
        debug!("Configured {:?}", search);
        Ok(search)
    }

    pub fn is_enabled(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Looks `message` up on the web. Returns `None` only when no provider is configured.
    pub async fn search(&self, message: &str) -> Option<String> {
        if !self.is_enabled() {
            debug!("Skipping web search: no providers configured");
            return None;
        }

        let term = extract_search_term(message);
        for provider in &self.providers {
            match provider.lookup(&term).await {
                Ok(Some(result)) => {
                    info!("Web search for '{}' answered by {}", term, provider.name());
                    return Some(result.to_string());
                }
                Ok(None) => {
                    debug!("{} had no result for '{}'", provider.name(), term);
                }
                Err(e) => {
                    warn!("{} search failed for '{}': {:#}", provider.name(), term, e);
                }
            }
        }
        Some(no_results_message(&term))
    }
}

/// Fake providers and a local HTTP stand-in for provider tests.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Answers with a fixed outcome and counts how often it was asked.
    pub struct StubProvider {
        pub name: &'static str,
        pub outcome: fn(&str) -> Result<Option<SearchResult>>,
        pub calls: Arc<AtomicUsize>,
    }

    impl StubProvider {
        pub fn boxed(
            name: &'static str,
            outcome: fn(&str) -> Result<Option<SearchResult>>,
        ) -> (Box<dyn SearchProvider>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let provider = Self {
                name,
                outcome,
                calls: calls.clone(),
            };
            (Box::new(provider), calls)
        }
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn lookup(&self, term: &str) -> Result<Option<SearchResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)(term)
        }
    }

    /// Serves `router` on an ephemeral localhost port and returns its base URL.
    pub async fn spawn_fake_server(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake server");
        let addr = listener.local_addr().expect("fake server address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{}", addr)
    }
}
