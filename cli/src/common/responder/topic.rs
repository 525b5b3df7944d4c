//! Topic extraction: strips leading question phrases and question marks.
//!
//! File: cli/src/common/responder/topic.rs
//! Author: Christi Mahu

use regex::Regex;
use std::sync::LazyLock;

/// Prefixes removed before naming a topic in a templated reply.
static QUESTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(what is|what are|who is|how to|how do i|why is|why are|why does|how does|tell me about) ",
    )
    .expect("question prefix pattern is valid")
});

/// Interrogative + auxiliary verb, removed before a web search.
static SEARCH_QUESTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(what|who|when|where|why|how) (is|are|was|were|do|does|did|can|could|would|should) ",
    )
    .expect("search question pattern is valid")
});

/// Imperative request phrases, removed before a web search.
static SEARCH_REQUEST_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(tell me about|explain|describe) ").expect("search request pattern is valid")
});

/// Lowercases `message`, strips each prefix in turn (once, anchored at the start),
/// removes every `?` and trims.
fn extract_with(message: &str, prefixes: &[&Regex]) -> String {
    let mut text = message.to_lowercase();
    for prefix in prefixes {
        text = prefix.replace(&text, "").into_owned();
    }
    text.replace('?', "").trim().to_string()
}

/// Topic named by the how-to and why replies.
pub fn extract_topic(message: &str) -> String {
    extract_with(message, &[&QUESTION_PREFIX])
}

/// Term sent to the web search providers.
pub fn extract_search_term(message: &str) -> String {
    extract_with(message, &[&SEARCH_QUESTION_PREFIX, &SEARCH_REQUEST_PREFIX])
}
