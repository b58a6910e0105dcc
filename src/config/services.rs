//! External content service configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Endpoints and credentials for the joke, weather, news and trivia services
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Random joke endpoint
    #[serde(default = "default_joke_url")]
    pub joke_url: String,

    /// OpenWeatherMap current-weather endpoint
    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    /// OpenWeatherMap API key
    pub weather_api_key: Option<Secret<String>>,

    /// NewsAPI top-headlines endpoint
    #[serde(default = "default_news_url")]
    pub news_url: String,

    /// NewsAPI key
    pub news_api_key: Option<Secret<String>>,

    /// Two-letter country code for headlines
    #[serde(default = "default_news_country")]
    pub news_country: String,

    /// Number of headlines per news reply
    #[serde(default = "default_news_count")]
    pub news_count: usize,

    /// Open Trivia DB endpoint
    #[serde(default = "default_trivia_url")]
    pub trivia_url: String,

    /// Questions per trivia session
    #[serde(default = "default_trivia_amount")]
    pub trivia_amount: u32,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ServicesConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, url) in [
            ("joke_url", &self.joke_url),
            ("weather_url", &self.weather_url),
            ("news_url", &self.news_url),
            ("trivia_url", &self.trivia_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidServiceUrl(name));
            }
        }
        if self.news_count == 0 || self.news_count > 20 {
            return Err(ValidationError::OutOfRange {
                field: "news_count",
                min: 1,
                max: 20,
            });
        }
        // Open Trivia DB caps a single request at 50 questions.
        if self.trivia_amount == 0 || self.trivia_amount > 50 {
            return Err(ValidationError::OutOfRange {
                field: "trivia_amount",
                min: 1,
                max: 50,
            });
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            joke_url: default_joke_url(),
            weather_url: default_weather_url(),
            weather_api_key: None,
            news_url: default_news_url(),
            news_api_key: None,
            news_country: default_news_country(),
            news_count: default_news_count(),
            trivia_url: default_trivia_url(),
            trivia_amount: default_trivia_amount(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_joke_url() -> String {
    "https://official-joke-api.appspot.com/random_joke".to_string()
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_news_url() -> String {
    "https://newsapi.org/v2/top-headlines".to_string()
}

fn default_news_country() -> String {
    "us".to_string()
}

fn default_news_count() -> usize {
    5
}

fn default_trivia_url() -> String {
    "https://opentdb.com/api.php".to_string()
}

fn default_trivia_amount() -> u32 {
    5
}

fn default_timeout() -> u64 {
    10
}
