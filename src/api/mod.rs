//! Remote debate service surface.
//!
//! [`DebateApi`] is the seam between the state-sync logic and the network:
//! the controller and index fetcher only see this trait, so tests drive them
//! with scripted implementations. [`HttpDebateApi`] is the real reqwest-backed
//! client.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ConversationSummary, Message};

/// Header carrying the session credential.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Errors surfaced by remote calls. Malformed response bodies show up as
/// `Transport` (reqwest decode failure); every non-2xx status becomes
/// `Status` with whatever body the service sent.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Body of `POST /chat`. `topic` is the topic seed and is only present on the
/// first turn of a fresh conversation; optional fields are skipped entirely
/// rather than sent as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// Response of `POST /chat`. The service keys the authoritative message list
/// under the singular `message`. `topic`/`stance` are structured metadata
/// that older service builds omit; the extractor fallback covers their
/// absence.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub conversation_id: String,
    #[serde(rename = "message", default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub stance: Option<String>,
}

/// Response of `GET /conversations/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationDetail {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub stance: Option<String>,
}

/// Response of `GET /conversations?limit&offset`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationPage {
    #[serde(default)]
    pub conversations: Vec<ConversationSummary>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// The remote debate service as the client consumes it.
#[async_trait]
pub trait DebateApi: Send + Sync {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;

    async fn get_conversation(&self, id: &str) -> Result<ConversationDetail, ApiError>;

    async fn list_conversations(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<ConversationPage, ApiError>;

    /// Credential probe used during login; any non-2xx means the key is
    /// invalid.
    async fn check_health(&self) -> Result<(), ApiError>;
}

pub use http::{HttpDebateApi, api_key_header};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_chat_request_skips_absent_optional_fields() {
        let request = ChatRequest {
            conversation_id: None,
            message: "Should social media be regulated?".to_string(),
            topic: Some("Should social media be regulated?".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("conversation_id").is_none());
        assert_eq!(json["message"], "Should social media be regulated?");
        assert_eq!(json["topic"], "Should social media be regulated?");
    }

    #[test]
    fn test_chat_request_with_id_and_no_topic() {
        let request = ChatRequest {
            conversation_id: Some("c1".to_string()),
            message: "I disagree".to_string(),
            topic: None,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["conversation_id"], "c1");
        assert!(json.get("topic").is_none());
    }

    #[test]
    fn test_chat_response_message_key_is_singular() {
        let json = r#"{
            "conversation_id": "c1",
            "message": [
                {"role":"user","message":"Hi","ts":1},
                {"role":"bot","message":"Topic: Cats\nStance: PRO","ts":2}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.conversation_id, "c1");
        assert_eq!(response.messages.len(), 2);
        assert_eq!(response.messages[1].role, Role::Bot);
        assert!(response.topic.is_none());
        assert!(response.stance.is_none());
    }

    #[test]
    fn test_conversation_detail_defaults_missing_fields() {
        let detail: ConversationDetail = serde_json::from_str("{}").unwrap();
        assert!(detail.messages.is_empty());
        assert!(detail.topic.is_none());
        assert!(detail.stance.is_none());
    }

    #[test]
    fn test_api_error_display_is_human_readable() {
        let err = ApiError::Status { status: 401, body: "invalid API key".to_string() };
        assert_eq!(err.to_string(), "server returned 401: invalid API key");
    }
}
