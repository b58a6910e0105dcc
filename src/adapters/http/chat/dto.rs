//! Request and response bodies for the chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::SendMessageResult;

/// Body of `POST /chat`.
///
/// Both fields are optional at the parsing level so that a missing
/// `user_input` is answered with the clarification text instead of a
/// generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Successful reply to `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
    pub ended: bool,
}

impl From<SendMessageResult> for ChatResponse {
    fn from(result: SendMessageResult) -> Self {
        Self {
            response: result.response,
            conversation_id: result.conversation_id.to_string(),
            ended: result.ended,
        }
    }
}

/// Error body; keeps the same `response` key the client already renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub response: String,
}

impl ErrorResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_fields_are_optional() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.user_input.is_none());
        assert!(request.conversation_id.is_none());

        let request: ChatRequest =
            serde_json::from_str(r#"{"user_input":"hi","extra":true}"#).unwrap();
        assert_eq!(request.user_input.as_deref(), Some("hi"));
    }
}
