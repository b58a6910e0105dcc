//! Trivia Question Source Port

use async_trait::async_trait;

use crate::domain::trivia::{TriviaQuestion, TriviaRequest};

use super::ServiceError;

/// Port for fetching a batch of trivia questions.
///
/// Unlike the content services this one reports failure as an error: the
/// trivia session decides what the user sees and aborts itself.
#[async_trait]
pub trait TriviaQuestionSource: Send + Sync {
    /// Fetches up to `request.amount` questions for the requested category
    /// and difficulty. An empty vector is a valid (if unhelpful) answer.
    async fn fetch_questions(
        &self,
        request: TriviaRequest,
    ) -> Result<Vec<TriviaQuestion>, ServiceError>;
}
