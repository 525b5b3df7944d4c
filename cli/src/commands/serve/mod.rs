//! # chatrs Chat Server
//!
//! File: cli/src/commands/serve/mod.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! `chatrs serve` exposes the chat service over HTTP (`POST /api/chat`).
//!
//! ## Architecture
//!
//! - `config.rs`: `serve` flags merged over the `[server]` configuration
//! - `api.rs`: the chat endpoint, its request/response shapes and error mapping
//! - `server_logic.rs`: router, middleware, port selection and shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve on the default address (127.0.0.1:3000)
//! chatrs serve
//!
//! # Listen on all interfaces, serve a front end, no web lookups
//! chatrs serve --host 0.0.0.0 --static-dir ./public --offline
//! ```
//!
use crate::common::chat_service::ChatService;
use crate::core::config::load_config;
use crate::core::error::Result;
use tracing::info;

pub use config::ServeArgs;

/// HTTP handlers for the chat endpoint.
pub mod api;
/// Merges `serve` flags with the `[server]` configuration.
pub mod config;
/// Axum router, middleware and server loop.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Loads the layered configuration, applies the flags, builds the chat
/// service and runs the server until shutdown.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let mut app_config = load_config()?;
    if args.offline {
        info!("Offline mode: web search disabled.");
        app_config.search.enabled = false;
    }

    let server_config = config::merge_server_config(&args, &app_config.server).await?;
    info!("Effective server config: {:?}", server_config);

    let service = ChatService::from_config(&app_config)?;
    server_logic::run_server(server_config, api::AppState::new(service)).await?;
    Ok(())
}
