//! # chatrs CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! that declares `mod common;` gets its own copy, so not every helper is used
//! everywhere.
//!

#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// # Get chatrs Command (`chatrs_cmd`)
///
/// An `assert_cmd::Command` for the compiled `chatrs` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn chatrs_cmd() -> Command {
    Command::cargo_bin("chatrs").expect("Failed to find chatrs binary for testing")
}

/// # Isolated Workspace (`Workspace`)
///
/// A temporary project directory (with a `.git` marker so the project config
/// search stops there) and a separate temporary home, so neither the user's
/// real configuration nor the repository's files leak into a test.
pub struct Workspace {
    pub project: TempDir,
    pub home: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let project = TempDir::new().expect("create project dir");
        fs::create_dir(project.path().join(".git")).expect("create .git marker");
        let home = TempDir::new().expect("create home dir");
        Self { project, home }
    }

    pub fn path(&self) -> &Path {
        self.project.path()
    }

    /// Writes `.chatrs.toml` into the project directory.
    pub fn write_config(&self, content: &str) {
        fs::write(self.path().join(".chatrs.toml"), content).expect("write .chatrs.toml");
    }

    /// Writes a file into the project directory and returns its absolute path.
    pub fn write_file(&self, name: &str, content: &str) -> String {
        let path = self.path().join(name);
        fs::write(&path, content).expect("write test file");
        path.display().to_string()
    }

    /// A `chatrs` command running inside this workspace.
    pub fn cmd(&self) -> Command {
        let mut cmd = chatrs_cmd();
        cmd.current_dir(self.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env_remove("RUST_LOG");
        cmd
    }
}
