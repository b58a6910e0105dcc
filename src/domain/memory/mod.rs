//! Memory module - per-conversation fact recall.
//!
//! Facts are short named strings the dispatcher learns from the user
//! (currently only their name) and reads back for personalized replies.

mod store;

pub use store::{MemoryStore, NAME_KEY};
