//! HTTP adapter for chat endpoints.
//!
//! Exposes the dispatcher as a JSON request/response API:
//! - `POST /chat` - Send one utterance, optionally within an existing conversation
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::ChatAppState;
pub use routes::chat_routes;
