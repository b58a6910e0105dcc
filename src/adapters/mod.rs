//! Adapters - Implementations of port interfaces and the front ends.
//!
//! Adapters connect the domain to external systems:
//! - `services` - Joke, weather, news and trivia HTTP clients
//! - `ai` - Fallback reply generation
//! - `storage` - Conversation state store
//! - `http` - JSON request/response interface
//! - `console` - Interactive line interface

pub mod ai;
pub mod console;
pub mod http;
pub mod services;
pub mod storage;
