//! Mock content services for testing.
//!
//! Each mock replays queued responses in order, then falls back to a fixed
//! default, and records every call for verification.
//!
//! # Example
//!
//! ```ignore
//! let jokes = MockJokeService::new().with_response("Knock knock - Who's there?");
//! assert_eq!(jokes.fetch_joke().await, "Knock knock - Who's there?");
//! assert_eq!(jokes.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::trivia::{TriviaQuestion, TriviaRequest};
use crate::ports::{JokeService, NewsService, ServiceError, TriviaQuestionSource, WeatherService};

use super::{JOKE_UNAVAILABLE, NEWS_UNAVAILABLE, WEATHER_UNAVAILABLE};

/// Queue of canned replies plus a log of call arguments.
#[derive(Debug)]
struct Script<R, C> {
    responses: Arc<Mutex<VecDeque<R>>>,
    calls: Arc<Mutex<Vec<C>>>,
}

impl<R, C> Clone for Script<R, C> {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<R, C: Clone> Script<R, C> {
    fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(&self, response: R) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn next(&self, call: C) -> Option<R> {
        self.calls.lock().unwrap().push(call);
        self.responses.lock().unwrap().pop_front()
    }

    fn calls(&self) -> Vec<C> {
        self.calls.lock().unwrap().clone()
    }
}

/// Mock joke service.
#[derive(Debug, Clone)]
pub struct MockJokeService {
    script: Script<String, ()>,
}

impl Default for MockJokeService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockJokeService {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    /// Queues a reply.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script.push(text.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.script.calls().len()
    }
}

#[async_trait]
impl JokeService for MockJokeService {
    async fn fetch_joke(&self) -> String {
        self.script
            .next(())
            .unwrap_or_else(|| JOKE_UNAVAILABLE.to_string())
    }
}

/// Mock weather service. Records the requested cities.
#[derive(Debug, Clone)]
pub struct MockWeatherService {
    script: Script<String, String>,
}

impl Default for MockWeatherService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWeatherService {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script.push(text.into());
        self
    }

    /// Cities passed to `fetch_weather`, in call order.
    pub fn requested_cities(&self) -> Vec<String> {
        self.script.calls()
    }
}

#[async_trait]
impl WeatherService for MockWeatherService {
    async fn fetch_weather(&self, city: &str) -> String {
        self.script
            .next(city.to_string())
            .unwrap_or_else(|| WEATHER_UNAVAILABLE.to_string())
    }
}

/// Mock news service. Records the requested headline counts.
#[derive(Debug, Clone)]
pub struct MockNewsService {
    script: Script<String, usize>,
}

impl Default for MockNewsService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNewsService {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script.push(text.into());
        self
    }

    pub fn requested_counts(&self) -> Vec<usize> {
        self.script.calls()
    }
}

#[async_trait]
impl NewsService for MockNewsService {
    async fn fetch_top_news(&self, count: usize) -> String {
        self.script
            .next(count)
            .unwrap_or_else(|| NEWS_UNAVAILABLE.to_string())
    }
}

/// Mock trivia question source. Records every request.
///
/// With nothing queued, a fetch fails with [`ServiceError::Rejected`].
#[derive(Debug, Clone)]
pub struct MockTriviaSource {
    script: Script<Result<Vec<TriviaQuestion>, ServiceError>, TriviaRequest>,
}

impl Default for MockTriviaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTriviaSource {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    /// Queues a successful batch.
    pub fn with_questions(self, questions: Vec<TriviaQuestion>) -> Self {
        self.script.push(Ok(questions));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: ServiceError) -> Self {
        self.script.push(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<TriviaRequest> {
        self.script.calls()
    }
}

#[async_trait]
impl TriviaQuestionSource for MockTriviaSource {
    async fn fetch_questions(
        &self,
        request: TriviaRequest,
    ) -> Result<Vec<TriviaQuestion>, ServiceError> {
        self.script
            .next(request)
            .unwrap_or_else(|| Err(ServiceError::rejected("no scripted questions")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trivia::{Category, Difficulty};

    #[tokio::test]
    async fn joke_mock_replays_then_falls_back() {
        let jokes = MockJokeService::new().with_response("a - b");

        assert_eq!(jokes.fetch_joke().await, "a - b");
        assert_eq!(jokes.fetch_joke().await, JOKE_UNAVAILABLE);
        assert_eq!(jokes.call_count(), 2);
    }

    #[tokio::test]
    async fn weather_mock_records_cities() {
        let weather = MockWeatherService::new().with_response("sunny");
        let clone = weather.clone();

        assert_eq!(clone.fetch_weather("paris").await, "sunny");
        assert_eq!(weather.requested_cities(), vec!["paris"]);
    }

    #[tokio::test]
    async fn news_mock_records_counts() {
        let news = MockNewsService::new();
        assert_eq!(news.fetch_top_news(5).await, NEWS_UNAVAILABLE);
        assert_eq!(news.requested_counts(), vec![5]);
    }

    #[tokio::test]
    async fn trivia_mock_defaults_to_error() {
        let source = MockTriviaSource::new();
        let request = TriviaRequest {
            amount: 5,
            category: Category::History,
            difficulty: Difficulty::Hard,
        };

        assert!(source.fetch_questions(request).await.is_err());
        assert_eq!(source.requests(), vec![request]);
    }
}
