//! Storage Adapters
//!
//! Implementations of the ConversationStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryConversationStore** - Keeps conversation state in process memory,
//!   bounded by an idle TTL and a capacity cap
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryConversationStore;
//!
//! let store = Arc::new(InMemoryConversationStore::new());
//! ```

mod in_memory_conversation_store;

pub use in_memory_conversation_store::{
    InMemoryConversationStore, DEFAULT_IDLE_TTL, DEFAULT_MAX_CONVERSATIONS,
};
