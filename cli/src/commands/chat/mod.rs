//! # chatrs Terminal Chat
//!
//! File: cli/src/commands/chat/mod.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! `chatrs chat` is an interactive client for a running `chatrs serve`.
//! Each line typed is posted to `/api/chat` and the reply is printed.
//!
//! In-session commands:
//! - `/key <KEY>`: sets the session API key (sent as `X-API-KEY`)
//! - `/quit`: ends the session (so does end of input)
//!
//! ## Examples
//!
//! ```bash
//! chatrs chat
//! chatrs chat --url http://10.0.0.5:3000 --api-key sk-example
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

pub mod client;
pub mod session;

use client::ChatClient;
use session::{ChatMessage, ChatSession, Sender};

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Base URL of the chat server.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub url: String,

    /// API key for this session only. Sent with every message.
    #[arg(long, env = "CHATRS_API_KEY")]
    pub api_key: Option<String>,
}

pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    let client = ChatClient::new(&args.url);
    info!("Starting chat session against {}", client.endpoint());
    let mut session = ChatSession::new();
    if let Some(key) = &args.api_key {
        session.set_api_key(key);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(&client, &mut session, stdin, &mut stdout).await
}

fn render(message: &ChatMessage) -> String {
    match message.sender {
        Sender::Bot => format!("bot> {}", message.text),
        Sender::User => format!("you> {}", message.text),
    }
}

/// Drives the session until `/quit` or end of input.
/// Everything already in the transcript is printed first.
async fn run_session<R, W>(
    client: &ChatClient,
    session: &mut ChatSession,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for message in session.messages() {
        writeln!(out, "{}", render(message))?;
    }
    writeln!(out, "(type /quit to leave, /key <KEY> to set an API key)")?;

    let mut lines = input.lines();
    loop {
        write!(out, "you> ")?;
        out.flush()?;

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from standard input")?
        else {
            writeln!(out)?;
            break;
        };

        let trimmed = line.trim();
        if trimmed == "/quit" {
            break;
        }
        if trimmed == "/key" || trimmed.starts_with("/key ") {
            match session.set_api_key(trimmed["/key".len()..].trim()) {
                Some(message) => writeln!(out, "{}", render(message))?,
                None => writeln!(out, "usage: /key <KEY>")?,
            }
            continue;
        }

        let Some(text) = session.begin_turn(&line) else {
            continue;
        };
        let reply = client.send(&text, session.api_key()).await;
        let message = session.finish_turn(reply);
        writeln!(out, "{}", render(message))?;
    }

    info!("Chat session ended after {} messages", session.messages().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::serve::api::AppState;
    use crate::commands::serve::config::ServerConfig;
    use crate::commands::serve::server_logic::create_app;
    use crate::common::chat_service::ChatService;
    use crate::common::responder::{KnowledgeBase, Responder};
    use crate::common::search::test_support::spawn_fake_server;
    use crate::common::search::FallbackSearch;
    use session::{API_KEY_SET_MESSAGE, WELCOME_MESSAGE};

    async fn local_server() -> String {
        let responder = Responder::new(KnowledgeBase::builtin()).unwrap();
        let state = AppState::new(ChatService::new(responder, FallbackSearch::disabled()));
        spawn_fake_server(create_app(&ServerConfig::default(), state)).await
    }

    #[tokio::test]
    async fn test_session_against_local_server() -> Result<()> {
        let client = ChatClient::new(&local_server().await);
        let mut session = ChatSession::new();
        let input: &[u8] = b"hello\n\n/key sk-test\nthanks\n/quit\nignored\n";
        let mut out = Vec::new();

        run_session(&client, &mut session, input, &mut out).await?;

        let texts: Vec<(u64, Sender, &str)> = session
            .messages()
            .iter()
            .map(|m| (m.id, m.sender, m.text.as_str()))
            .collect();
        assert_eq!(
            texts,
            vec![
                (1, Sender::Bot, WELCOME_MESSAGE),
                (2, Sender::User, "hello"),
                (
                    3,
                    Sender::Bot,
                    "Hello! I'm your chatbot assistant. How can I help you today?"
                ),
                (4, Sender::Bot, API_KEY_SET_MESSAGE),
                (5, Sender::User, "thanks"),
                (
                    6,
                    Sender::Bot,
                    "You're welcome! Is there anything else you'd like to know?"
                ),
            ]
        );
        assert_eq!(session.api_key(), Some("sk-test"));

        let printed = String::from_utf8(out)?;
        assert!(printed.starts_with(&format!("bot> {}\n", WELCOME_MESSAGE)));
        assert!(!printed.contains("ignored"));
        Ok(())
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() -> Result<()> {
        let client = ChatClient::new("http://127.0.0.1:9");
        let mut session = ChatSession::new();
        let input: &[u8] = b"";
        let mut out = Vec::new();

        run_session(&client, &mut session, input, &mut out).await?;
        assert_eq!(session.messages().len(), 1);
        Ok(())
    }
}
