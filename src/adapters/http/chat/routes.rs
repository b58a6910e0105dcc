//! Axum router configuration for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, health, ChatAppState};

/// Create the chat API router.
///
/// # Routes
/// - `POST /chat` - Dispatch one utterance
/// - `GET /health` - Liveness probe
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
}
