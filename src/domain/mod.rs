//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `memory` - Per-conversation fact store
//! - `trivia` - Trivia questions and the session state machine
//! - `dispatch` - Intent classification and conversation state

pub mod dispatch;
pub mod foundation;
pub mod memory;
pub mod trivia;
