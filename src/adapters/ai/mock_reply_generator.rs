//! Mock Reply Generator for testing.
//!
//! Replays queued replies in order. A queued failure behaves like a real
//! upstream error: the apology text with the history left untouched. With
//! nothing queued the mock echoes the utterance.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::dispatch::ChatHistory;
use crate::ports::{GeneratedReply, ReplyGenerator};

use super::GENERATOR_UNAVAILABLE;

/// A recorded call to the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub history_len: usize,
    pub utterance: String,
}

/// Mock reply generator for testing.
#[derive(Debug, Clone, Default)]
pub struct MockReplyGenerator {
    /// `Some(text)` succeeds, `None` simulates an upstream failure.
    responses: Arc<Mutex<VecDeque<Option<String>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockReplyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful reply to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Some(text.into()));
        self
    }

    /// Adds a failure to the queue.
    pub fn with_failure(self) -> Self {
        self.responses.lock().unwrap().push_back(None);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ReplyGenerator for MockReplyGenerator {
    async fn generate_reply(&self, history: &ChatHistory, utterance: &str) -> GeneratedReply {
        self.calls.lock().unwrap().push(RecordedCall {
            history_len: history.len(),
            utterance: utterance.to_string(),
        });

        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Some(format!("You said: {}", utterance)));

        match next {
            Some(text) => {
                let history = history.with_exchange(utterance, text.as_str());
                GeneratedReply::new(text, history)
            }
            None => GeneratedReply::new(GENERATOR_UNAVAILABLE, history.clone()),
        }
    }
}
