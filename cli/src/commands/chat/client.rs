//! HTTP client for a running `chatrs serve`.
//!
//! File: cli/src/commands/chat/client.rs
//! Author: Christi Mahu
//!
//! Failures never escape [`ChatClient::send`]; they become one of the two
//! fixed apology texts so the session can always append a bot message.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

pub const PROCESSING_ERROR_MESSAGE: &str = "Sorry, there was an error processing your request.";
pub const CONNECTION_ERROR_MESSAGE: &str = "Sorry, there was an error connecting to the server.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Either shape the endpoint answers with.
#[derive(Deserialize, Debug)]
struct ChatReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one message and returns the text to show as the bot reply.
    pub async fn send(&self, message: &str, api_key: Option<&str>) -> String {
        let mut request = self.http.post(&self.endpoint).json(&ChatRequest { message });
        if let Some(key) = api_key {
            request = request.header("X-API-KEY", key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send message: {}", e);
                return CONNECTION_ERROR_MESSAGE.to_string();
            }
        };
        let status = response.status();
        let reply: ChatReply = match response.json().await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Failed to decode reply (status {}): {}", status, e);
                return CONNECTION_ERROR_MESSAGE.to_string();
            }
        };

        if !status.is_success() {
            error!("Error: {}", reply.error.as_deref().unwrap_or("unknown"));
            return PROCESSING_ERROR_MESSAGE.to_string();
        }
        match reply.response {
            Some(text) => {
                debug!("Received {} bytes of reply", text.len());
                text
            }
            None => {
                error!("Reply from {} has no `response` field", self.endpoint);
                CONNECTION_ERROR_MESSAGE.to_string()
            }
        }
    }
}
