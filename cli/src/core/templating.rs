//! # chatrs Reply Templating
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! Templated replies ("how to ..." and "why ...") are rendered with Tera.
//! The templates are compiled once when the responder is built and then
//! shared read-only between requests.
//!
//! ## Usage
//!
//! ```rust
//! let templates = ReplyTemplates::new()?;
//! let text = templates.render(ReplyTemplate::HowTo, "learn python")?;
//! ```
//!
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use std::collections::HashMap;
use tera::Tera;
use tracing::debug;

const HOW_TO_TEMPLATE: &str = "To work with {{ topic }}, you would typically follow these steps:

1. Learn the basic concepts and principles
2. Set up your development environment
3. Start with small, simple projects
4. Practice regularly and build increasingly complex applications
5. Use resources like documentation, tutorials, and community forums

For more specific guidance, I recommend looking at official documentation or specialized tutorials for {{ topic }}.";

const WHY_TEMPLATE: &str = "{{ topic }} is valuable in the tech industry for several reasons:

1. It solves specific problems efficiently
2. It's widely used and supported by a strong community
3. It has proven to be effective in real-world applications
4. It integrates well with other technologies
5. It continues to evolve and improve

The specific benefits depend on your use case and requirements.";

/// The templated reply kinds known to the responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTemplate {
    HowTo,
    Why,
}

impl ReplyTemplate {
    fn name(self) -> &'static str {
        match self {
            ReplyTemplate::HowTo => "how_to.txt",
            ReplyTemplate::Why => "why.txt",
        }
    }
}

/// Compiled reply templates.
#[derive(Debug, Clone)]
pub struct ReplyTemplates {
    tera: Tera,
}

impl ReplyTemplates {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // Replies are plain text; never HTML-escape the topic.
        tera.autoescape_on(Vec::new());
        tera.add_raw_templates(vec![
            (ReplyTemplate::HowTo.name(), HOW_TO_TEMPLATE),
            (ReplyTemplate::Why.name(), WHY_TEMPLATE),
        ])
        .map_err(|e| anyhow!(ChatError::Template { source: e }))
        .context("Failed to compile reply templates")?;
        Ok(Self { tera })
    }

    /// Renders `template` with `topic` substituted.
    pub fn render(&self, template: ReplyTemplate, topic: &str) -> Result<String> {
        let mut context_map = HashMap::new();
        context_map.insert("topic", topic);
        let context = tera::Context::from_serialize(&context_map)
            .map_err(|e| anyhow!(ChatError::Template { source: e }))?;

        debug!("Rendering reply template '{}'", template.name());
        self.tera
            .render(template.name(), &context)
            .map_err(|e| {
                anyhow!(ChatError::Template { source: e })
                    .context(format!("Tera rendering failed for '{}'", template.name()))
            })
    }
}
