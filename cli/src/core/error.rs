//! # chatrs Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! This module defines the error types used throughout chatrs. It follows
//! the same two-level approach as the rest of the crate:
//! - `ChatError`: a `thiserror` enum for the failures we want to name
//! - `Result<T>`: a type alias for `anyhow::Result<T>` so context can be attached freely
//!
//! The error types cover:
//! - Configuration loading and validation
//! - Knowledge base loading (duplicate or empty keys)
//! - Reply template rendering
//! - Outbound HTTP calls to the search providers
//!
//! HTTP handlers do not use these directly. They map failures onto
//! `commands::serve::api::ApiError`, which decides what a client may see.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if url.is_empty() {
//!     return Err(ChatError::Config("search_url must not be empty".into()))?;
//! }
//!
//! // Add context with anyhow
//! let raw = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read knowledge file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the chatrs application.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("HTTP request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Search provider '{provider}' answered with status {status}")]
    ProviderStatus { provider: String, status: u16 },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
