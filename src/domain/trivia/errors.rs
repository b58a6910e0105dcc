//! Error types for the trivia domain

use super::TriviaPhase;
use crate::domain::foundation::ValidationError;

/// Trivia session errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum TriviaError {
    #[error("No trivia questions were available")]
    NoQuestions,

    #[error("Input not accepted while the session is {0:?}")]
    UnexpectedInput(TriviaPhase),

    #[error(transparent)]
    InvalidTransition(#[from] ValidationError),
}
