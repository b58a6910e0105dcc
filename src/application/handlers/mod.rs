//! Command handlers, grouped by area.

pub mod chat;

pub use chat::{
    ConversationLocks, SendMessageCommand, SendMessageError, SendMessageHandler,
    SendMessageResult,
};
