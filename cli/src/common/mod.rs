//! # chatrs Common Modules
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! Answering logic shared by the command handlers. None of it knows about
//! HTTP or the terminal:
//! - `responder`: ordered rule matching over the knowledge base
//! - `search`: the external search provider chain
//! - `chat_service`: responder first, web search when it has no answer
//!

/// Wires the responder to the web search fallback.
pub mod chat_service;
/// Rule-based reply generation and the knowledge base.
pub mod responder;
/// Web search providers (Wikipedia, SerpAPI) tried in order.
pub mod search;
