//! Application layer - Dispatcher and command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The [`Dispatcher`] is the single entry point both front ends share; the
//! chat handlers add conversation storage on top of it for request/response use.

pub mod dispatcher;
pub mod handlers;

pub use dispatcher::{Dispatcher, Reply, EMPTY_INPUT_REPLY, TRIVIA_UNAVAILABLE};
pub use handlers::{
    ConversationLocks, SendMessageCommand, SendMessageError, SendMessageHandler,
    SendMessageResult,
};
