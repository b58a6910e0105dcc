//! Content service ports - jokes, weather and news.
//!
//! These look-ups produce text that goes straight to the user, so each
//! operation is infallible from the caller's point of view: implementations
//! answer with a fixed apology when the upstream call fails.

use async_trait::async_trait;

/// Port for fetching a random joke.
#[async_trait]
pub trait JokeService: Send + Sync {
    /// Returns `"{setup} - {punchline}"`, or the joke failure message.
    async fn fetch_joke(&self) -> String;
}

/// Port for current weather conditions.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Returns a one-sentence weather report for `city`, or the weather
    /// failure message.
    async fn fetch_weather(&self, city: &str) -> String;
}

/// Port for top news headlines.
#[async_trait]
pub trait NewsService: Send + Sync {
    /// Returns up to `count` headlines, one `"- {title}"` per line, or the
    /// news failure message.
    async fn fetch_top_news(&self, count: usize) -> String;
}
