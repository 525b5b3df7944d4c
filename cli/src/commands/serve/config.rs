//! # chatrs Server Configuration
//!
//! File: cli/src/commands/serve/config.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! This module turns the `[server]` section of the loaded configuration and
//! the `chatrs serve` flags into one effective `ServerConfig`:
//! 1. Command-line arguments (highest priority, when they differ from their defaults)
//! 2. `[server]` from `.chatrs.toml` / the user config
//! 3. Default values (lowest priority)
//!
//! The optional static directory is resolved to an absolute, canonical path
//! and must exist.
//!
use crate::core::config::ServerSection;
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::net::IpAddr;
use std::{env, path::PathBuf};
use tracing::debug;

/// # Serve Command Arguments (`ServeArgs`)
///
/// Command-line arguments for `chatrs serve`. They override the `[server]`
/// settings from configuration files.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Sets the network port the server will listen on.
    /// If the port is busy, the next free port is used.
    #[arg(long, short, default_value_t = 3000)]
    pub port: u16,

    /// Sets the network IP address the server will bind to.
    /// Use `0.0.0.0` to accept connections from other machines.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,

    /// Serves a browser front end from this directory at `/`.
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Answers from the knowledge base only; never queries the web.
    #[arg(long)]
    pub offline: bool,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// The consolidated settings the server logic runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// The network port the server will listen on.
    pub port: u16,

    /// The network IP address the server will bind to.
    pub host: IpAddr,

    /// Whether CORS headers are sent.
    pub enable_cors: bool,

    /// Resolved absolute path of the static front end, if any.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let section = ServerSection::default();
        Self {
            port: section.port,
            host: section.host,
            enable_cors: section.enable_cors,
            static_dir: None,
        }
    }
}

/// # Merge Server Configuration (`merge_server_config`)
///
/// Starts from the file settings and applies each flag that was set to a
/// non-default value. `--no-cors` always wins when present, and `--static-dir`
/// replaces a configured directory.
///
/// ## Errors
///
/// Returns an error if the resulting static directory does not exist or is
/// not a directory.
pub async fn merge_server_config(args: &ServeArgs, file: &ServerSection) -> Result<ServerConfig> {
    let cli_defaults = ServeArgs::parse_from([""]);

    let mut config = ServerConfig {
        port: file.port,
        host: file.host,
        enable_cors: file.enable_cors,
        static_dir: file.static_dir.as_ref().map(PathBuf::from),
    };

    if args.port != cli_defaults.port {
        config.port = args.port;
    }
    if args.host != cli_defaults.host {
        config.host = args.host;
    }
    if args.no_cors {
        config.enable_cors = false;
    }
    if let Some(dir) = &args.static_dir {
        config.static_dir = Some(dir.clone());
    }

    config.resolve_static_dir().await?;
    debug!("Merged server configuration: {:?}", config);
    Ok(config)
}

impl ServerConfig {
    /// Makes `static_dir` absolute and canonical, and checks it is a directory.
    async fn resolve_static_dir(&mut self) -> Result<()> {
        let Some(dir_path) = &self.static_dir else {
            return Ok(());
        };

        let absolute_path = if dir_path.is_absolute() {
            dir_path.clone()
        } else {
            env::current_dir()
                .context("Failed to get current working directory")?
                .join(dir_path)
        };

        let canonical_path = tokio::fs::canonicalize(&absolute_path)
            .await
            .with_context(|| {
                format!(
                    "Static directory '{}' could not be found or accessed",
                    absolute_path.display()
                )
            })?;
        let metadata = tokio::fs::metadata(&canonical_path)
            .await
            .with_context(|| format!("Failed to get metadata for '{}'", canonical_path.display()))?;
        if !metadata.is_dir() {
            return Err(anyhow!(ChatError::Config(format!(
                "Static path is not a directory: {}",
                canonical_path.display()
            ))));
        }

        debug!("Resolved static directory to: {}", canonical_path.display());
        self.static_dir = Some(canonical_path);
        Ok(())
    }
}
