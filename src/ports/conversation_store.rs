//! Conversation Store Port
//!
//! Keeps per-conversation state between request/response turns. The only
//! shipped implementation is in-memory; nothing survives a restart.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::dispatch::ConversationState;
use crate::domain::foundation::ConversationId;

/// Errors from the conversation store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("conversation store unavailable: {0}")]
    Unavailable(String),
}

/// Port for conversation state keyed by [`ConversationId`].
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the stored state, or `None` for an unknown id.
    async fn load(&self, id: ConversationId) -> Result<Option<ConversationState>, StorageError>;

    /// Inserts or replaces the state under `state.id`.
    async fn save(&self, state: ConversationState) -> Result<(), StorageError>;

    /// Drops the state for `id`. Removing an unknown id is not an error.
    async fn remove(&self, id: ConversationId) -> Result<(), StorageError>;

    /// Number of live conversations.
    async fn count(&self) -> Result<usize, StorageError>;
}
