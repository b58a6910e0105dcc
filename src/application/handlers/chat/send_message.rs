//! SendMessageHandler - Dispatch one utterance within a stored conversation

use std::sync::Arc;
use thiserror::Error;

use crate::application::dispatcher::Dispatcher;
use crate::domain::dispatch::{ConversationState, DispatchMode};
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, StorageError};

use super::ConversationLocks;

/// Command to send a message in a conversation
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// Existing conversation, or `None` to start a new one.
    pub conversation_id: Option<ConversationId>,
    pub user_input: String,
}

/// Result of sending a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageResult {
    pub conversation_id: ConversationId,
    pub response: String,
    /// The conversation ended and its state was dropped.
    pub ended: bool,
}

/// Error type for sending messages
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// Blank input; nothing was loaded or stored.
    #[error("user input is empty")]
    EmptyInput,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Handler for sending messages in stored conversations
pub struct SendMessageHandler {
    dispatcher: Arc<Dispatcher>,
    store: Arc<dyn ConversationStore>,
    locks: ConversationLocks,
}

impl SendMessageHandler {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        store: Arc<dyn ConversationStore>,
        locks: ConversationLocks,
    ) -> Self {
        Self {
            dispatcher,
            store,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        if cmd.user_input.trim().is_empty() {
            return Err(SendMessageError::EmptyInput);
        }

        let id = cmd.conversation_id.unwrap_or_default();
        let guard = self.locks.acquire(id).await;
        let result = self.handle_locked(id, &cmd.user_input).await;
        drop(guard);
        self.locks.prune(id).await;

        result
    }

    async fn handle_locked(
        &self,
        id: ConversationId,
        user_input: &str,
    ) -> Result<SendMessageResult, SendMessageError> {
        // 1. Load the conversation, or start one for unknown ids
        let mut state = match self.store.load(id).await? {
            Some(state) => state,
            None => {
                tracing::debug!(conversation_id = %id, "starting conversation");
                ConversationState::new(id, DispatchMode::Web)
            }
        };

        // 2. Dispatch
        let reply = self.dispatcher.handle(&mut state, user_input).await;

        // 3. Persist, or forget the conversation once it has ended
        if reply.ended {
            self.store.remove(id).await?;
        } else {
            self.store.save(state).await?;
        }

        Ok(SendMessageResult {
            conversation_id: id,
            response: reply.text,
            ended: reply.ended,
        })
    }
}
