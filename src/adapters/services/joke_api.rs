//! Joke API adapter - official-joke-api random joke.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{JokeService, ServiceError};

use super::http_client::{build_client, get_json};

/// Reply when the joke service is unreachable or returns garbage.
pub const JOKE_UNAVAILABLE: &str = "I couldn't fetch a joke at the moment. Try again later!";

/// Client for an endpoint returning `{"setup": .., "punchline": ..}`.
pub struct JokeApiClient {
    url: String,
    timeout: Duration,
    client: Client,
}

impl JokeApiClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        Ok(Self {
            url: url.into(),
            timeout,
            client: build_client(timeout)?,
        })
    }

    async fn random_joke(&self) -> Result<Joke, ServiceError> {
        get_json(self.client.get(&self.url), self.timeout.as_secs()).await
    }
}

#[async_trait]
impl JokeService for JokeApiClient {
    async fn fetch_joke(&self) -> String {
        match self.random_joke().await {
            Ok(joke) => joke.render(),
            Err(err) => {
                tracing::warn!(error = %err, "joke fetch failed");
                JOKE_UNAVAILABLE.to_string()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct Joke {
    setup: String,
    punchline: String,
}

impl Joke {
    fn render(&self) -> String {
        format!("{} - {}", self.setup, self.punchline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joke_renders_setup_and_punchline() {
        let body = r#"{"type":"general","setup":"Why did the chicken cross the road?","punchline":"To get to the other side.","id":1}"#;
        let joke: Joke = serde_json::from_str(body).unwrap();
        assert_eq!(
            joke.render(),
            "Why did the chicken cross the road? - To get to the other side."
        );
    }

    #[tokio::test]
    async fn unreachable_service_yields_fixed_message() {
        let client = JokeApiClient::new("http://127.0.0.1:9/joke", Duration::from_secs(1)).unwrap();
        assert_eq!(client.fetch_joke().await, JOKE_UNAVAILABLE);
    }
}
