//! # chatrs Topics Command
//!
//! File: cli/src/commands/topics/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `chatrs topics` prints the knowledge base keys in the order they are
//! matched: built-in topics first, then those from `[knowledge].extra_file`.
//!
//! ```
//! Knowledge base topics (19):
//!
//!   javascript
//!   python
//!   ...
//! ```
//!
use crate::common::chat_service::ChatService;
use crate::common::responder::KnowledgeBase;
use crate::core::config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct TopicsArgs {}

pub async fn handle_topics(_args: TopicsArgs) -> Result<()> {
    info!("Handling topics command");
    let mut app_config = config::load_config()?;
    // Listing never searches; skip building the HTTP client.
    app_config.search.enabled = false;

    let service = ChatService::from_config(&app_config)?;
    print!("{}", format_topics(service.responder().knowledge()));
    Ok(())
}

fn format_topics(knowledge: &KnowledgeBase) -> String {
    if knowledge.is_empty() {
        return "The knowledge base has no topics.\n".to_string();
    }
    let mut out = format!("Knowledge base topics ({}):\n\n", knowledge.len());
    for key in knowledge.keys() {
        out.push_str("  ");
        out.push_str(key);
        out.push('\n');
    }
    out
}
