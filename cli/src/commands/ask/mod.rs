//! # chatrs Ask Command
//!
//! File: cli/src/commands/ask/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `chatrs ask <MESSAGE...>` answers a single message without starting a
//! server. The words are joined with single spaces and go through the same
//! answer chain as `POST /api/chat`.
//!
//! ```bash
//! chatrs ask what is docker
//! chatrs ask --offline "Who invented the telescope?"
//! ```
//!
use crate::common::chat_service::ChatService;
use crate::core::config;
use crate::core::error::{ChatError, Result};
use anyhow::anyhow;
use clap::Parser;
use tracing::{debug, info};

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to send. Quote it to keep punctuation intact in your shell.
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,

    /// Answers from the knowledge base only; never queries the web.
    #[arg(long)]
    pub offline: bool,
}

impl AskArgs {
    /// Joins the message words. An all-blank message is rejected.
    fn joined_message(&self) -> Result<String> {
        let message = self.message.join(" ");
        if message.trim().is_empty() {
            return Err(anyhow!(ChatError::ArgumentParsing(
                "Message is required".to_string()
            )));
        }
        Ok(message)
    }
}

pub async fn handle_ask(args: AskArgs) -> Result<()> {
    info!("Handling ask command (offline: {})", args.offline);
    let message = args.joined_message()?;

    let mut app_config = config::load_config()?;
    if args.offline {
        app_config.search.enabled = false;
    }
    let service = ChatService::from_config(&app_config)?;

    debug!("Asking: {:?}", message);
    let answer = service.answer(&message).await;
    println!("{}", answer);
    Ok(())
}
