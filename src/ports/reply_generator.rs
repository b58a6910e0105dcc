//! Reply Generator Port - fallback conversational text.
//!
//! When no intent matches, the dispatcher hands the utterance and the
//! conversation's history to a generator. The history is opaque to the
//! dispatcher; whatever the generator returns replaces the stored one.

use async_trait::async_trait;

use crate::domain::dispatch::ChatHistory;

/// Text generated for one utterance, plus the history to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReply {
    pub text: String,
    pub history: ChatHistory,
}

impl GeneratedReply {
    pub fn new(text: impl Into<String>, history: ChatHistory) -> Self {
        Self {
            text: text.into(),
            history,
        }
    }
}

/// Port for free-form reply generation.
///
/// Implementations must not fail: on an upstream error they answer with the
/// generator failure message and return `history` unchanged.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(&self, history: &ChatHistory, utterance: &str) -> GeneratedReply;
}
