//! # chatrs Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! Top-level commands of the chatrs CLI. Each module defines its clap
//! arguments struct and an async `handle_*` function called from `main.rs`.
//!
//! - `serve`: HTTP chat endpoint
//! - `ask`: one-shot answer in the terminal
//! - `chat`: interactive client for a running server
//! - `topics`: knowledge base listing
//!

/// One-shot question answering (`chatrs ask`).
pub mod ask;
/// Terminal chat client (`chatrs chat`).
pub mod chat;
/// HTTP chat endpoint (`chatrs serve`).
pub mod serve;
/// Knowledge base listing (`chatrs topics`).
pub mod topics;
