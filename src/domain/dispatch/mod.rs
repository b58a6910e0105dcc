//! Dispatch Domain Module
//!
//! Everything the dispatcher needs to decide what to do with one line of
//! user input, without touching any external service.
//!
//! - **Intent**: pure keyword classification of an utterance
//! - **ConversationState**: the explicit per-conversation context
//! - **ChatHistory**: opaque transcript handed to the reply generator

mod conversation;
mod history;
mod intent;

pub use conversation::ConversationState;
pub use history::{ChatHistory, ChatMessage, ChatRole};
pub use intent::{classify, DispatchMode, Intent};
