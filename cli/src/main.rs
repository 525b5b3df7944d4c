//! # chatrs Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! Entry point for the chatrs CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Run the chat endpoint
//! chatrs serve
//!
//! # Ask one question with debug logging
//! chatrs -vv ask what is rust
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (serve, ask, chat, topics)
mod common; // Responder, web search and the chat service
mod core; // Errors, config, templating

#[derive(Parser, Debug)]
#[command(
    name = "chatrs",
    about = "💬 chatrs: a small knowledge-base chatbot with web search fallback",
    long_about = "Answers technology questions from a built-in knowledge base and falls back\n\
                  to Wikipedia and Google (via SerpAPI) for everything else.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Run the HTTP chat endpoint.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    /// Answer a single message and exit.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Chat interactively with a running server.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// List the knowledge base topics.
    Topics(commands::topics::TopicsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Serve(args) => commands::serve::handle_serve(args).await,
        Commands::Ask(args) => commands::ask::handle_ask(args).await,
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Topics(args) => commands::topics::handle_topics(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
