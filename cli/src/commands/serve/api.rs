//! # chatrs Chat API
//!
//! File: cli/src/commands/serve/api.rs
//! Author: Christi Mahu
//!
//! **DISCLAIMER:** This repository is in the early phases of being written
//! and is not suitable for production deployment yet.
//!
//! ## Overview
//!
//! `POST /api/chat` takes `{ "message": "..." }` and answers `{ "response": "..." }`.
//!
//! | Situation                                   | Status | Body                                          |
//! |---------------------------------------------|--------|-----------------------------------------------|
//! | answered                                    | 200    | `{ "response": ... }`                         |
//! | `message` missing, `null`, `false`, `0`, `""` | 400    | `{ "error": "Message is required" }`          |
//! | not JSON, or `message` another non-string   | 500    | `{ "error": "Failed to process your request" }` |
//!
//! Search provider failures never show up here. They are absorbed by the
//! fallback chain.
//!
use crate::common::chat_service::ChatService;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Header the chat client uses for its session API key. Accepted and ignored.
pub const API_KEY_HEADER: &str = "x-api-key";

/// State shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: Arc<ChatService>,
}

impl AppState {
    pub fn new(service: ChatService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// `message` is kept as raw JSON so falsy non-strings can be told apart
/// from values of the wrong type.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    /// `null`, `false`, `0` and `""` (or no field) count as missing and give 400.
    /// Any other non-string gives 500.
    fn into_message(self) -> Result<String, ApiError> {
        match self.message {
            Some(Value::String(m)) if !m.is_empty() => Ok(m),
            None | Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_)) => {
                Err(ApiError::BadRequest("Message is required".to_owned()))
            }
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
                Err(ApiError::BadRequest("Message is required".to_owned()))
            }
            Some(other) => Err(ApiError::Internal(format!(
                "message is not a string: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

/// Errors a handler can return. Internal detail is logged, never sent.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ApiError::Internal(m) => {
                error!(message = %m, "Error processing chat request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process your request".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

/// Routes of the chat API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(state)
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    if headers.contains_key(API_KEY_HEADER) {
        debug!("Request carries an API key header; it is not used");
    }

    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Internal(format!("invalid request body: {}", e)))?;

    let message = request.into_message()?;

    let response = state.service.answer(&message).await;
    Ok(Json(ChatResponse { response }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::responder::{KnowledgeBase, Responder, UNKNOWN_REPLY};
    use crate::common::search::test_support::StubProvider;
    use crate::common::search::{FallbackSearch, SearchResult};
    use crate::core::error::Result;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    fn offline_state() -> AppState {
        let responder = Responder::new(KnowledgeBase::builtin()).unwrap();
        AppState::new(ChatService::new(responder, FallbackSearch::disabled()))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_chat_answers_from_knowledge_base() {
        let (status, body) =
            post_chat(router(offline_state()), r#"{"message":"Tell me about git"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"]
            .as_str()
            .unwrap()
            .starts_with("Git is a distributed version control system"));
    }

    #[tokio::test]
    async fn test_missing_message_is_bad_request() {
        for body in [
            r#"{}"#,
            r#"{"message":null}"#,
            r#"{"message":""}"#,
            r#"{"message":false}"#,
            r#"{"message":0}"#,
        ] {
            let (status, json) = post_chat(router(offline_state()), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json["error"], "Message is required");
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_internal_error() {
        for body in [
            "not json",
            r#"{"message": 42}"#,
            r#"{"message": true}"#,
            r#"{"message": ["hi"]}"#,
        ] {
            let (status, json) = post_chat(router(offline_state()), body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body: {body}");
            assert_eq!(json["error"], "Failed to process your request");
        }
    }

    #[tokio::test]
    async fn test_unknown_offline_returns_sentinel() {
        let (status, body) =
            post_chat(router(offline_state()), r#"{"message":"zxqv wobble"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], UNKNOWN_REPLY);
    }

    fn wiki_hit(term: &str) -> Result<Option<SearchResult>> {
        Ok(Some(SearchResult {
            snippet: format!("{term} explained"),
            source_label: "Wikipedia".into(),
        }))
    }

    #[tokio::test]
    async fn test_unknown_falls_back_to_search_once() {
        let (provider, calls) = StubProvider::boxed("stub", wiki_hit);
        let responder = Responder::new(KnowledgeBase::builtin()).unwrap();
        let state = AppState::new(ChatService::new(
            responder,
            FallbackSearch::new(vec![provider]),
        ));

        let (status, body) = post_chat(router(state), r#"{"message":"zxqv wobble?"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "Based on web search: zxqv wobble explained\n\nSource: Wikipedia"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_api_key_header_is_inert() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .header("X-API-KEY", "sk-test")
            .body(Body::from(r#"{"message":"hello"}"#))
            .unwrap();
        let response = router(offline_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
