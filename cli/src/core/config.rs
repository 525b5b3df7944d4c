//! # chatrs Configuration Management
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! This module loads the chatrs configuration from TOML files. Settings are
//! layered, lowest priority first:
//! 1. Built-in defaults
//! 2. User configuration (`<config dir>/chatrs/config.toml`)
//! 3. Project configuration (`.chatrs.toml`, searched upwards from the current directory)
//!
//! Command-line flags are applied on top of the result by the individual
//! commands (see `commands::serve::config`).
//!
//! ## Example
//!
//! ```toml
//! [server]
//! port = 3000
//! host = "127.0.0.1"
//! enable_cors = true
//! static_dir = "~/sites/chat-widget"
//!
//! [search]
//! enabled = true
//! timeout_secs = 10
//!
//! [search.wikipedia]
//! search_url = "https://en.wikipedia.org/w/api.php"
//! summary_url = "https://en.wikipedia.org/api/rest_v1/page/summary"
//!
//! [search.serpapi]
//! enabled = false
//!
//! [knowledge]
//! extra_file = "~/.config/chatrs/knowledge.toml"
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the modules that need it.
//!
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use toml::{Table, Value};
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// Settings for the HTTP endpoint (`chatrs serve`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    /// Directory with a browser front end, served at `/` when set (can use ~).
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// Web search fallback settings.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Master switch. When false no provider is ever queried.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Per-request timeout for outbound calls. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub serpapi: SerpApiConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WikipediaConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_wikipedia_search_url")]
    pub search_url: String,
    #[serde(default = "default_wikipedia_summary_url")]
    pub summary_url: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SerpApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_serpapi_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_serpapi_key")]
    pub api_key: String,
}

/// Knowledge base extensions.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// TOML file with extra `[[entry]]` tables appended after the built-in topics (can use ~).
    #[serde(default)]
    pub extra_file: Option<String>,
}

fn default_port() -> u16 {
    3000
}
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_true() -> bool {
    true
}
fn default_wikipedia_search_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}
fn default_wikipedia_summary_url() -> String {
    "https://en.wikipedia.org/api/rest_v1/page/summary".to_string()
}
fn default_serpapi_endpoint() -> String {
    "https://serpapi.com/search.json".to_string()
}
fn default_serpapi_key() -> String {
    "demo".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: true,
            static_dir: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: None,
            wikipedia: WikipediaConfig::default(),
            serpapi: SerpApiConfig::default(),
        }
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            search_url: default_wikipedia_search_url(),
            summary_url: default_wikipedia_summary_url(),
        }
    }
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_serpapi_endpoint(),
            api_key: default_serpapi_key(),
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".chatrs.toml";

/// Loads, merges, expands and validates the configuration for this invocation.
pub fn load_config() -> Result<Config> {
    let user_table = load_user_config()?;
    let project_table = load_project_config()?;
    let mut merged_config = merge_configs(user_table, project_table)?;
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Table>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "chatrs", "chatrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Table>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.chatrs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.chatrs.toml`.
/// The search stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads one file as a raw TOML table. The table must also be a valid
/// `Config` on its own, so errors name the file they come from.
fn load_config_from_path(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let table: Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    Value::Table(table.clone())
        .try_into::<Config>()
        .with_context(|| format!("Invalid configuration in file: {}", path.display()))?;
    Ok(table)
}

/// Overlays `overlay` onto `base`. Nested tables merge key by key; any other
/// value in `overlay` replaces the one in `base`, even when it equals the default.
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        if let Value::Table(overlay_table) = value {
            if let Some(Value::Table(base_table)) = base.get_mut(&key) {
                merge_tables(base_table, overlay_table);
                continue;
            }
            base.insert(key, Value::Table(overlay_table));
        } else {
            base.insert(key, value);
        }
    }
}

/// Project settings win over user settings for every key the project file sets.
fn merge_configs(user: Option<Table>, project: Option<Table>) -> Result<Config> {
    let mut merged = user.unwrap_or_default();
    if let Some(project) = project {
        merge_tables(&mut merged, project);
    }
    Value::Table(merged)
        .try_into::<Config>()
        .context("Failed to build merged configuration")
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    if let Some(dir) = config.server.static_dir.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded static directory: {}", dir);
    }
    if let Some(file) = config.knowledge.extra_file.as_mut() {
        *file = shellexpand::tilde(file.as_str()).into_owned();
        debug!("Expanded knowledge file: {}", file);
    }
    Ok(())
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if let Some(dir) = &config.server.static_dir {
        let dir = PathBuf::from(dir);
        if !dir.is_dir() {
            return Err(anyhow!(ChatError::Config(format!(
                "Configured static directory '{}' does not exist or is not a directory.",
                dir.display()
            ))));
        }
    }
    if let Some(file) = &config.knowledge.extra_file {
        if !Path::new(file).is_file() {
            return Err(anyhow!(ChatError::Config(format!(
                "Configured knowledge file '{}' does not exist or is not a file.",
                file
            ))));
        }
    }
    if config.search.timeout_secs == Some(0) {
        return Err(anyhow!(ChatError::Config(
            "search.timeout_secs must be greater than zero (omit it to disable timeouts).".into()
        )));
    }
    let urls = [
        ("search.wikipedia.search_url", &config.search.wikipedia.search_url),
        ("search.wikipedia.summary_url", &config.search.wikipedia.summary_url),
        ("search.serpapi.endpoint", &config.search.serpapi.endpoint),
    ];
    for (name, url) in urls {
        if !is_http_url(url) {
            return Err(anyhow!(ChatError::Config(format!(
                "Invalid URL for {}: '{}'. Expected an http:// or https:// URL.",
                name, url
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}
