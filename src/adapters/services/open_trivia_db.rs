//! Open Trivia DB adapter.
//!
//! Questions are requested with `encode=url3986` so every text field is
//! percent-encoded and can be decoded losslessly, instead of scrubbing the
//! default HTML entities.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::trivia::{TriviaQuestion, TriviaRequest};
use crate::ports::{ServiceError, TriviaQuestionSource};

use super::http_client::{build_client, get_json};

/// Client for the Open Trivia DB `api.php` endpoint.
pub struct OpenTriviaDbClient {
    url: String,
    timeout: Duration,
    client: Client,
}

impl OpenTriviaDbClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        Ok(Self {
            url: url.into(),
            timeout,
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl TriviaQuestionSource for OpenTriviaDbClient {
    async fn fetch_questions(
        &self,
        request: TriviaRequest,
    ) -> Result<Vec<TriviaQuestion>, ServiceError> {
        let amount = request.amount.to_string();
        let category = request.category.id().to_string();
        let http_request = self.client.get(&self.url).query(&[
            ("amount", amount.as_str()),
            ("category", category.as_str()),
            ("difficulty", request.difficulty.as_str()),
            ("encode", "url3986"),
        ]);

        let response: TriviaResponse = get_json(http_request, self.timeout.as_secs()).await?;
        let questions = response.into_questions()?;

        tracing::debug!(
            count = questions.len(),
            category = %request.category,
            difficulty = %request.difficulty,
            "fetched trivia questions"
        );
        Ok(questions)
    }
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl TriviaResponse {
    fn into_questions(self) -> Result<Vec<TriviaQuestion>, ServiceError> {
        // 1 = not enough questions, 2 = invalid parameter, 3-5 = token/rate issues
        if self.response_code != 0 {
            return Err(ServiceError::rejected(format!(
                "response code {}",
                self.response_code
            )));
        }
        self.results.into_iter().map(RawQuestion::decode).collect()
    }
}

impl RawQuestion {
    fn decode(self) -> Result<TriviaQuestion, ServiceError> {
        let incorrect = self
            .incorrect_answers
            .iter()
            .map(|a| decode_field(a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TriviaQuestion::new(
            decode_field(&self.question)?,
            decode_field(&self.correct_answer)?,
            incorrect,
        ))
    }
}

fn decode_field(raw: &str) -> Result<String, ServiceError> {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|e| ServiceError::parse(format!("Invalid url3986 field: {}", e)))
}
