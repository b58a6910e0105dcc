//! Conversation State Entity
//!
//! The explicit context the dispatcher reads and updates on every turn.
//! One instance per conversation; nothing is shared between them.

use crate::domain::foundation::ConversationId;
use crate::domain::memory::MemoryStore;
use crate::domain::trivia::TriviaSession;

use super::{ChatHistory, DispatchMode};

/// Complete state of one conversation
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub id: ConversationId,
    pub mode: DispatchMode,
    pub memory: MemoryStore,
    pub history: ChatHistory,
    /// In-progress trivia session; while present it receives every input.
    pub trivia: Option<TriviaSession>,
    pub turn_count: u32,
    ended: bool,
}

impl ConversationState {
    pub fn new(id: ConversationId, mode: DispatchMode) -> Self {
        Self {
            id,
            mode,
            memory: MemoryStore::new(),
            history: ChatHistory::new(),
            trivia: None,
            turn_count: 0,
            ended: false,
        }
    }

    pub fn in_trivia(&self) -> bool {
        self.trivia.is_some()
    }

    /// Marks the conversation as ended by the exit intent.
    pub fn end(&mut self) {
        self.ended = true;
        self.trivia = None;
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}
