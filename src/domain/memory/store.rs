//! Key-value fact store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key under which the user's self-introduced name is stored.
pub const NAME_KEY: &str = "name";

/// Mapping from fact name to fact value.
///
/// Keys are case-sensitive and the last write wins. Nothing expires; the
/// store lives exactly as long as the conversation that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    facts: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.facts.insert(key.into(), value.into());
    }

    /// Looks up `key`, returning `None` when it was never set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.facts.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
