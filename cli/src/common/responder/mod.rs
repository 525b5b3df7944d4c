//! # chatrs Responder (`common::responder`)
//!
//! File: cli/src/common/responder/mod.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! Maps a free-text message to a [`Reply`] by ordered rule matching. The
//! first rule that matches wins, and the order is part of the behaviour:
//!
//! 1. Greeting (message starts with hello / hi / hey / greetings)
//! 2. Identity question ("who are you", "what are you")
//! 3. Farewell
//! 4. Thanks
//! 5. Time query (answers with the local wall-clock time)
//! 6. Capability question
//! 7. Knowledge base substring scan, in table order
//! 8. "what is X" with X collapsed to one token, exact key lookup
//! 9. "how to" questions, templated five-step answer
//! 10. "why" questions, templated five-point answer
//! 11. Otherwise [`Reply::Unknown`], which tells the caller to try a web search
//!
//! Every rule runs against the lowercased message. Responding never fails.
//!
//! ## Submodules
//!
//! - `knowledge`: the ordered topic table
//! - `topic`: leading-phrase stripping for templated replies and search terms
//!
use crate::core::error::Result;
use crate::core::templating::{ReplyTemplate, ReplyTemplates};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

pub mod knowledge;
pub mod topic;

pub use knowledge::KnowledgeBase;
pub use topic::{extract_search_term, extract_topic};

/// Text of [`Reply::Unknown`].
pub const UNKNOWN_REPLY: &str =
    "I don't have specific information on that topic in my knowledge base, but I'll search the web for you!";

const GREETING_REPLY: &str = "Hello! I'm your chatbot assistant. How can I help you today?";
const IDENTITY_REPLY: &str = "I'm a chatbot built with Rust. I can answer questions from my knowledge base and search the web for information I don't know!";
const FAREWELL_REPLY: &str = "Goodbye! Feel free to come back if you have more questions.";
const THANKS_REPLY: &str = "You're welcome! Is there anything else you'd like to know?";
const CAPABILITY_REPLY: &str = "I can answer questions about various technology topics from my knowledge base, and for other topics, I can search the web to find information. Just ask me anything!";

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("responder pattern is valid")
}

static GREETING: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)^(hello|hi|hey|greetings)"));
static IDENTITY: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)who are you|what are you"));
static FAREWELL: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)goodbye|bye|see you"));
static THANKS: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)thank you|thanks"));
static TIME: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)what time|what is the time|current time"));
static CAPABILITY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)what can you do|help me with|what do you know"));
static WHAT_IS: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)what is ([a-z\s]+)"));
static HOW_TO: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)how to|how do i|steps to"));
static WHY: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)why is|why are|why does"));

/// Outcome of matching a message against the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answered(String),
    /// No rule matched. Displays as [`UNKNOWN_REPLY`].
    Unknown,
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Answered(text) => text,
            Reply::Unknown => UNKNOWN_REPLY,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Reply::Answered(text) => text,
            Reply::Unknown => UNKNOWN_REPLY.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Reply::Unknown)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Rule-based responder over a fixed knowledge base.
#[derive(Debug, Clone)]
pub struct Responder {
    knowledge: KnowledgeBase,
    templates: ReplyTemplates,
}

impl Responder {
    pub fn new(knowledge: KnowledgeBase) -> Result<Self> {
        Ok(Self {
            knowledge,
            templates: ReplyTemplates::new()?,
        })
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn respond(&self, message: &str) -> Reply {
        let lower = message.to_lowercase();

        if GREETING.is_match(&lower) {
            return Reply::Answered(GREETING_REPLY.to_string());
        }
        if IDENTITY.is_match(&lower) {
            return Reply::Answered(IDENTITY_REPLY.to_string());
        }
        if FAREWELL.is_match(&lower) {
            return Reply::Answered(FAREWELL_REPLY.to_string());
        }
        if THANKS.is_match(&lower) {
            return Reply::Answered(THANKS_REPLY.to_string());
        }
        if TIME.is_match(&lower) {
            let now = chrono::Local::now().format("%-I:%M:%S %p");
            return Reply::Answered(format!("The current time is {}.", now));
        }
        if CAPABILITY.is_match(&lower) {
            return Reply::Answered(CAPABILITY_REPLY.to_string());
        }

        if let Some(entry) = self.knowledge.find_substring(&lower) {
            debug!("Knowledge base substring hit on '{}'", entry.key);
            return Reply::Answered(entry.text.clone());
        }

        if let Some(caps) = WHAT_IS.captures(&lower) {
            let key: String = caps[1].split_whitespace().collect();
            if let Some(text) = self.knowledge.get(&key) {
                debug!("Knowledge base exact hit on '{}'", key);
                return Reply::Answered(text.to_string());
            }
        }

        if HOW_TO.is_match(&lower) {
            return self.templated(ReplyTemplate::HowTo, &lower);
        }
        if WHY.is_match(&lower) {
            return self.templated(ReplyTemplate::Why, &lower);
        }

        debug!("No responder rule matched");
        Reply::Unknown
    }

    fn templated(&self, template: ReplyTemplate, lower: &str) -> Reply {
        let topic = extract_topic(lower);
        match self.templates.render(template, &topic) {
            Ok(text) => Reply::Answered(text),
            Err(e) => {
                warn!("Failed to render {:?} reply for '{}': {:#}", template, topic, e);
                Reply::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> Responder {
        Responder::new(KnowledgeBase::builtin()).expect("builtin responder")
    }

    fn answer(message: &str) -> String {
        responder().respond(message).into_text()
    }

    #[test]
    fn test_greeting_regardless_of_trailing_content() {
        for msg in ["hello", "Hi there", "HEY, what is css?", "greetings earthling"] {
            assert_eq!(answer(msg), GREETING_REPLY, "message: {msg}");
        }
    }

    #[test]
    fn test_greeting_prefix_is_not_word_bounded() {
        // "history" starts with "hi".
        assert_eq!(answer("history of python"), GREETING_REPLY);
    }

    #[test]
    fn test_greeting_beats_knowledge_base() {
        assert_eq!(answer("hello, tell me about docker"), GREETING_REPLY);
    }

    #[test]
    fn test_identity_farewell_thanks_capability() {
        assert_eq!(answer("Who are you?"), IDENTITY_REPLY);
        assert_eq!(answer("ok bye"), FAREWELL_REPLY);
        assert_eq!(answer("see you later"), FAREWELL_REPLY);
        assert_eq!(answer("thanks a lot"), THANKS_REPLY);
        assert_eq!(answer("what can you do"), CAPABILITY_REPLY);
    }

    #[test]
    fn test_identity_beats_farewell() {
        assert_eq!(answer("what are you, goodbye"), IDENTITY_REPLY);
    }

    #[test]
    fn test_time_query() {
        let text = answer("what time is it");
        assert!(text.starts_with("The current time is "));
        assert!(text.ends_with("M."));
    }

    #[test]
    fn test_knowledge_substring_hit() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(answer("Tell me about Docker"), kb.get("docker").unwrap());
        // Substring inside another word still matches.
        assert_eq!(answer("the capital of france"), kb.get("api").unwrap());
        assert_eq!(answer("digital cameras"), kb.get("git").unwrap());
    }

    #[test]
    fn test_what_is_exact_path_after_substring_miss() {
        let kb = KnowledgeBase::builtin();
        // "machine learning" only matches after whitespace is collapsed.
        assert_eq!(
            answer("what is machine learning"),
            kb.get("machinelearning").unwrap()
        );
    }

    #[test]
    fn test_what_is_typescript() {
        let kb = KnowledgeBase::from_pairs([
            ("javascript", "JS text"),
            ("typescript", "TS text"),
        ])
        .unwrap();
        let responder = Responder::new(kb).unwrap();
        assert_eq!(
            responder.respond("what is typescript"),
            Reply::Answered("TS text".into())
        );
    }

    #[test]
    fn test_how_to_template() {
        let text = answer("How to bake bread?");
        assert!(text.starts_with("To work with bake bread, you would typically follow these steps:"));
        assert!(text.contains("5. Use resources like documentation"));
    }

    #[test]
    fn test_why_template() {
        let text = answer("why is the sky blue");
        assert!(text.starts_with("the sky blue is valuable in the tech industry"));
    }

    #[test]
    fn test_unknown() {
        let reply = responder().respond("quantum chromodynamics");
        assert!(reply.is_unknown());
        assert_eq!(reply.to_string(), UNKNOWN_REPLY);
    }

    #[test]
    fn test_empty_knowledge_base_falls_through() {
        let responder = Responder::new(KnowledgeBase::default()).unwrap();
        assert_eq!(responder.respond("what is python"), Reply::Unknown);
    }
}
