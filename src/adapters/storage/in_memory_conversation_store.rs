//! In-Memory Conversation Store Adapter
//!
//! Stores conversation state in memory. State is lost on restart.
//!
//! Conversations idle for longer than the TTL are evicted on the next save,
//! and the map never holds more than `max_conversations` entries: saving a
//! new conversation at capacity drops the least recently touched one.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::dispatch::ConversationState;
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, StorageError};

/// Default cap on stored conversations.
pub const DEFAULT_MAX_CONVERSATIONS: usize = 10_000;

/// Default idle time after which a conversation is forgotten.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// A stored conversation and when it was last saved.
#[derive(Debug, Clone)]
struct StoredConversation {
    state: ConversationState,
    last_touched: Instant,
}

/// In-memory storage for conversation state
#[derive(Debug, Clone)]
pub struct InMemoryConversationStore {
    states: Arc<RwLock<HashMap<ConversationId, StoredConversation>>>,
    max_conversations: usize,
    idle_ttl: Duration,
}

impl InMemoryConversationStore {
    /// Create a new in-memory store with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of stored conversations (at least one is kept)
    pub fn with_max_conversations(mut self, max: usize) -> Self {
        self.max_conversations = max.max(1);
        self
    }

    /// Forget conversations not saved within `ttl`
    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = ttl;
        self
    }

    /// Clear all stored conversations (useful for tests)
    pub async fn clear(&self) {
        self.states.write().await.clear();
    }

    fn is_expired(&self, stored: &StoredConversation, now: Instant) -> bool {
        now.duration_since(stored.last_touched) > self.idle_ttl
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self {
            states: Arc::new(RwLock::new(HashMap::new())),
            max_conversations: DEFAULT_MAX_CONVERSATIONS,
            idle_ttl: DEFAULT_IDLE_TTL,
        }
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, id: ConversationId) -> Result<Option<ConversationState>, StorageError> {
        let states = self.states.read().await;
        let now = Instant::now();
        Ok(states
            .get(&id)
            .filter(|stored| !self.is_expired(stored, now))
            .map(|stored| stored.state.clone()))
    }

    async fn save(&self, state: ConversationState) -> Result<(), StorageError> {
        let mut states = self.states.write().await;
        let now = Instant::now();

        let before = states.len();
        states.retain(|_, stored| !self.is_expired(stored, now));
        let expired = before - states.len();
        if expired > 0 {
            tracing::debug!(expired, "evicted idle conversations");
        }

        if !states.contains_key(&state.id) && states.len() >= self.max_conversations {
            let oldest = states
                .iter()
                .min_by_key(|(_, stored)| stored.last_touched)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                states.remove(&oldest);
                tracing::debug!(conversation_id = %oldest, "evicted oldest conversation at capacity");
            }
        }

        states.insert(
            state.id,
            StoredConversation {
                state,
                last_touched: now,
            },
        );
        Ok(())
    }

    async fn remove(&self, id: ConversationId) -> Result<(), StorageError> {
        self.states.write().await.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.states.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dispatch::DispatchMode;
    use crate::domain::memory::NAME_KEY;

    fn state_with_name(name: &str) -> ConversationState {
        let mut state = ConversationState::new(ConversationId::new(), DispatchMode::Web);
        state.memory.set(NAME_KEY, name);
        state
    }

    #[tokio::test]
    async fn test_save_and_load_state() {
        let store = InMemoryConversationStore::new();
        let state = state_with_name("Ada");
        let id = state.id;

        store.save(state).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.memory.get(NAME_KEY), Some("Ada"));
    }

    #[tokio::test]
    async fn test_load_unknown_id_returns_none() {
        let store = InMemoryConversationStore::new();
        let result = store.load(ConversationId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_existing_state() {
        let store = InMemoryConversationStore::new();
        let mut state = state_with_name("Ada");
        let id = state.id;
        store.save(state.clone()).await.unwrap();

        state.memory.set(NAME_KEY, "Grace");
        store.save(state).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        assert_eq!(loaded.memory.get(NAME_KEY), Some("Grace"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_state() {
        let store = InMemoryConversationStore::new();
        let state = state_with_name("Ada");
        let id = state.id;
        store.save(state).await.unwrap();

        store.remove(id).await.unwrap();
        assert!(store.load(id).await.unwrap().is_none());

        // Removing again is fine
        store.remove(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_conversations_are_isolated() {
        let store = InMemoryConversationStore::new();
        let first = state_with_name("Ada");
        let second = ConversationState::new(ConversationId::new(), DispatchMode::Web);
        let (first_id, second_id) = (first.id, second.id);

        store.save(first).await.unwrap();
        store.save(second).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        let loaded = store.load(second_id).await.unwrap().unwrap();
        assert!(loaded.memory.get(NAME_KEY).is_none());
        assert!(store.load(first_id).await.unwrap().is_some());

        store.clear().await;
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_saved() {
        let store = InMemoryConversationStore::new().with_max_conversations(2);
        let first = state_with_name("Ada");
        let second = state_with_name("Grace");
        let third = state_with_name("Linus");
        let (first_id, second_id, third_id) = (first.id, second.id, third.id);

        store.save(first.clone()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.save(second).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        // Touching the first conversation makes the second the oldest
        store.save(first).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.save(third).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.load(first_id).await.unwrap().is_some());
        assert!(store.load(second_id).await.unwrap().is_none());
        assert!(store.load(third_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_saving_existing_conversation_at_capacity_evicts_nothing() {
        let store = InMemoryConversationStore::new().with_max_conversations(1);
        let state = state_with_name("Ada");
        let id = state.id;

        store.save(state.clone()).await.unwrap();
        store.save(state).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.load(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_idle_conversations_expire() {
        let store = InMemoryConversationStore::new().with_idle_ttl(Duration::from_millis(20));
        let idle = state_with_name("Ada");
        let idle_id = idle.id;
        store.save(idle).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(store.load(idle_id).await.unwrap().is_none());

        // The next save sweeps the expired entry
        let fresh = state_with_name("Grace");
        let fresh_id = fresh.id;
        store.save(fresh).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.load(fresh_id).await.unwrap().is_some());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let store = InMemoryConversationStore::new().with_max_conversations(0);
        assert_eq!(store.max_conversations, 1);
    }
}
