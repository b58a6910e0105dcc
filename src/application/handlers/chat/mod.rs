//! Chat Command Handlers
//!
//! ## Commands
//! - `SendMessage` - Dispatch one utterance within a stored conversation
//!
//! ## Support
//! - `ConversationLocks` - Serializes turns that share a conversation id

mod locks;
mod send_message;

pub use locks::ConversationLocks;
pub use send_message::{SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult};
