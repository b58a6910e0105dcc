//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to the SendMessage command handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    SendMessageCommand, SendMessageError, SendMessageHandler, EMPTY_INPUT_REPLY,
};
use crate::domain::foundation::ConversationId;

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};

/// Shared application state for the chat routes.
#[derive(Clone)]
pub struct ChatAppState {
    pub send_message: Arc<SendMessageHandler>,
}

impl ChatAppState {
    pub fn new(send_message: Arc<SendMessageHandler>) -> Self {
        Self { send_message }
    }
}

/// `POST /chat`
pub async fn chat(
    State(state): State<ChatAppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected chat body");
            return empty_input();
        }
    };

    let user_input = request.user_input.unwrap_or_default();
    // Ids that don't parse are treated like unknown ones: a fresh conversation.
    let conversation_id = request
        .conversation_id
        .as_deref()
        .and_then(|raw| raw.parse::<ConversationId>().ok());

    let cmd = SendMessageCommand {
        conversation_id,
        user_input,
    };

    match state.send_message.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(ChatResponse::from(result))).into_response(),
        Err(SendMessageError::EmptyInput) => empty_input(),
        Err(SendMessageError::Storage(err)) => {
            tracing::error!(error = %err, "conversation store failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Something went wrong. Please try again.")),
            )
                .into_response()
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn empty_input() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(EMPTY_INPUT_REPLY)),
    )
        .into_response()
}
