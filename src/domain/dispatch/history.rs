//! Conversation transcript passed to the reply generator.

use serde::{Deserialize, Serialize};

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only transcript of fallback turns.
///
/// The dispatcher never inspects this; it hands it to the generator and
/// stores whatever the generator returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy extended with one user turn and one assistant turn.
    pub fn with_exchange(&self, utterance: impl Into<String>, reply: impl Into<String>) -> Self {
        let mut messages = self.messages.clone();
        messages.push(ChatMessage::user(utterance));
        messages.push(ChatMessage::assistant(reply));
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The last `window` messages, oldest first.
    pub fn recent(&self, window: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(window);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_exchange_appends_without_mutating_original() {
        let history = ChatHistory::new();
        let extended = history.with_exchange("hey there", "hello!");

        assert!(history.is_empty());
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.messages()[0], ChatMessage::user("hey there"));
        assert_eq!(extended.messages()[1], ChatMessage::assistant("hello!"));
    }

    #[test]
    fn recent_returns_trailing_window() {
        let history = ChatHistory::new()
            .with_exchange("one", "1")
            .with_exchange("two", "2");

        let recent = history.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content, "1");
        assert_eq!(recent[2].content, "2");

        assert_eq!(history.recent(10).len(), 4);
        assert!(history.recent(0).is_empty());
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
