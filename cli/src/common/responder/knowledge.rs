//! # Knowledge Base
//!
//! File: cli/src/common/responder/knowledge.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! A fixed table mapping lowercase topic keywords to explanatory paragraphs.
//! Entries are held in insertion order and that order is the matching
//! priority of the substring scan: the first key found inside a message wins.
//!
//! Extra entries can be appended from a TOML file:
//!
//! ```toml
//! [[entry]]
//! key = "rust"
//! text = "Rust is a systems programming language ..."
//! ```
//!
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("javascript", "JavaScript is a high-level programming language primarily used for web development. It allows you to create interactive elements on websites and is supported by all modern web browsers."),
    ("typescript", "TypeScript is a superset of JavaScript that adds static typing. It helps catch errors during development and makes code more maintainable for larger projects."),
    ("react", "React is a JavaScript library for building user interfaces, particularly single-page applications. It's maintained by Facebook and allows developers to create reusable UI components."),
    ("nextjs", "Next.js is a React framework that enables server-side rendering and static site generation. It simplifies the process of building fast and SEO-friendly React applications."),
    ("python", "Python is a high-level, general-purpose programming language known for its readability and simplicity. It's widely used in data science, AI, web development, and automation."),
    ("html", "HTML (HyperText Markup Language) is the standard markup language for documents designed to be displayed in a web browser. It defines the structure and content of web pages."),
    ("css", "CSS (Cascading Style Sheets) is a style sheet language used for describing the presentation of a document written in HTML. It controls the layout and appearance of web pages."),
    ("api", "API (Application Programming Interface) is a set of rules that allows different software applications to communicate with each other. It defines the methods and data formats that applications can use to request and exchange information."),
    ("database", "A database is an organized collection of data stored electronically. It allows for efficient retrieval, manipulation, and management of data. Common types include relational databases (SQL) and NoSQL databases."),
    ("git", "Git is a distributed version control system used to track changes in source code during software development. It allows multiple developers to work on the same codebase without conflicts."),
    ("docker", "Docker is a platform that uses containerization technology to package applications and their dependencies together. This ensures consistent operation across different computing environments."),
    ("nodejs", "Node.js is a JavaScript runtime environment that allows executing JavaScript code outside a web browser. It's particularly useful for building scalable network applications and APIs."),
    ("ai", "Artificial Intelligence (AI) refers to computer systems capable of performing tasks that typically require human intelligence. This includes learning from experience, recognizing patterns, and making decisions."),
    ("machinelearning", "Machine Learning is a subset of AI focused on building systems that can learn from and make decisions based on data. It enables computers to improve performance without explicit programming."),
    ("frontend", "Frontend development refers to building the user-facing parts of websites and applications. It involves using HTML, CSS, and JavaScript to create interfaces that users can see and interact with."),
    ("backend", "Backend development refers to server-side web application logic. It involves working with servers, databases, and APIs to power the frontend experience and process business logic."),
    ("cloud", "Cloud computing provides on-demand delivery of computing services over the internet. This includes servers, storage, databases, networking, software, and analytics without direct active management by the user."),
    ("security", "Cybersecurity involves protecting computer systems, networks, and data from digital attacks, damage, or unauthorized access. It's increasingly important as more businesses and services move online."),
    ("devops", "DevOps is a set of practices that combines software development and IT operations. It aims to shorten the development lifecycle while delivering features, fixes, and updates more frequently and reliably."),
];

/// One topic keyword and its fixed explanation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeEntry {
    pub key: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgeFile {
    #[serde(default)]
    entry: Vec<KnowledgeEntry>,
}

/// Ordered, read-only topic table.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// The built-in technology topics.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ENTRIES
                .iter()
                .map(|(key, text)| KnowledgeEntry {
                    key: (*key).to_string(),
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }

    /// Builds a table from `(key, text)` pairs, keeping their order.
    #[cfg(test)]
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut kb = Self::default();
        for (key, text) in pairs {
            kb.insert(KnowledgeEntry {
                key: key.into(),
                text: text.into(),
            })?;
        }
        Ok(kb)
    }

    /// Appends one entry. Keys are normalised to trimmed lowercase and must be unique.
    pub fn insert(&mut self, entry: KnowledgeEntry) -> Result<()> {
        let key = entry.key.trim().to_lowercase();
        if key.is_empty() {
            return Err(anyhow!(ChatError::KnowledgeBase(
                "entry key must not be empty".into()
            )));
        }
        if entry.text.trim().is_empty() {
            return Err(anyhow!(ChatError::KnowledgeBase(format!(
                "entry '{}' has an empty text",
                key
            ))));
        }
        if self.get(&key).is_some() {
            return Err(anyhow!(ChatError::KnowledgeBase(format!(
                "duplicate key '{}'",
                key
            ))));
        }
        debug!("Registered knowledge entry '{}'", key);
        self.entries.push(KnowledgeEntry {
            key,
            text: entry.text,
        });
        Ok(())
    }

    /// Appends the `[[entry]]` tables of a TOML document.
    pub fn extend_from_toml(&mut self, content: &str) -> Result<usize> {
        let file: KnowledgeFile =
            toml::from_str(content).context("Failed to parse knowledge TOML")?;
        let count = file.entry.len();
        for entry in file.entry {
            self.insert(entry)?;
        }
        Ok(count)
    }

    /// Reads `path` and appends its entries.
    pub fn load_extra_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge file: {}", path.display()))?;
        let count = self
            .extend_from_toml(&content)
            .with_context(|| format!("Invalid knowledge file: {}", path.display()))?;
        info!("Loaded {} knowledge entries from {}", count, path.display());
        Ok(())
    }

    /// First entry, in table order, whose key occurs anywhere in `lower_message`.
    ///
    /// Plain substring containment: "api" matches inside "capital".
    pub fn find_substring(&self, lower_message: &str) -> Option<&KnowledgeEntry> {
        self.entries
            .iter()
            .find(|entry| lower_message.contains(entry.key.as_str()))
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.text.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
