//! # chatrs Chat Service (`common::chat_service`)
//!
//! File: cli/src/common/chat_service.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! Glues the responder and the web search fallback into the answer chain used
//! by both `chatrs serve` and `chatrs ask`:
//!
//! local rules → first provider → second provider → canned message
//!
//! The search runs only when the responder returns
//! [`crate::common::responder::Reply::Unknown`]. If the
//! search is disabled it yields nothing and the unknown reply text is used.
//!
use crate::common::responder::{KnowledgeBase, Responder};
use crate::common::search::FallbackSearch;
use crate::core::config::Config;
use crate::core::error::Result;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ChatService {
    responder: Responder,
    search: FallbackSearch,
}

impl ChatService {
    pub fn new(responder: Responder, search: FallbackSearch) -> Self {
        Self { responder, search }
    }

    /// Builds the knowledge base (built-ins plus any configured extra file),
    /// the responder and the provider chain.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut knowledge = KnowledgeBase::builtin();
        if let Some(file) = &config.knowledge.extra_file {
            knowledge.load_extra_file(Path::new(file))?;
        }
        info!("Knowledge base ready with {} topics", knowledge.len());

        let responder = Responder::new(knowledge)?;
        let search = FallbackSearch::from_config(&config.search)?;
        Ok(Self::new(responder, search))
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    pub fn search_enabled(&self) -> bool {
        self.search.is_enabled()
    }

    /// Answers one message. Never fails.
    pub async fn answer(&self, message: &str) -> String {
        let reply = self.responder.respond(message);
        if !reply.is_unknown() {
            return reply.into_text();
        }
        debug!("Responder had no answer, falling back to web search");
        match self.search.search(message).await {
            Some(text) => text,
            None => reply.into_text(),
        }
    }
}
