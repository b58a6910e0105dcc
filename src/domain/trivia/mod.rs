//! Trivia Domain Module
//!
//! A multiple-choice quiz played over several conversation turns.
//!
//! # Architecture
//!
//! - **TriviaQuestion**: one fetched question with its answers
//! - **Difficulty / Category**: the closed sets a player chooses from
//! - **TriviaSession**: phase-driven state machine advanced one input at a time
//!
//! The session never performs I/O. When it needs questions it yields a
//! [`TriviaStep::Fetch`] carrying a [`TriviaRequest`]; the caller fetches and
//! hands the result back through [`TriviaSession::begin`].

mod errors;
mod question;
mod session;

pub use errors::TriviaError;
pub use question::{Category, Difficulty, TriviaQuestion};
pub use session::{TriviaPhase, TriviaRequest, TriviaSession, TriviaStep, DEFAULT_QUESTION_COUNT};
