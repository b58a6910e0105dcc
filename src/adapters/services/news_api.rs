//! NewsAPI adapter - top headlines for one country.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{NewsService, ServiceError};

use super::http_client::{build_client, get_json};

/// Reply when headlines cannot be fetched.
pub const NEWS_UNAVAILABLE: &str =
    "I couldn't fetch the news at the moment. Please try again later.";

/// Client for the NewsAPI `top-headlines` endpoint.
pub struct NewsApiClient {
    url: String,
    api_key: Option<Secret<String>>,
    country: String,
    timeout: Duration,
    client: Client,
}

impl NewsApiClient {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<Secret<String>>,
        country: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            url: url.into(),
            api_key,
            country: country.into(),
            timeout,
            client: build_client(timeout)?,
        })
    }

    async fn top_headlines(&self) -> Result<Headlines, ServiceError> {
        let api_key = self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
            .ok_or(ServiceError::NotConfigured("services.news_api_key"))?;

        let request = self
            .client
            .get(&self.url)
            .query(&[("country", self.country.as_str()), ("apiKey", api_key)]);
        let headlines: Headlines = get_json(request, self.timeout.as_secs()).await?;

        if headlines.status != "ok" {
            return Err(ServiceError::rejected(format!(
                "status {}",
                headlines.status
            )));
        }
        Ok(headlines)
    }
}

#[async_trait]
impl NewsService for NewsApiClient {
    async fn fetch_top_news(&self, count: usize) -> String {
        let result = self
            .top_headlines()
            .await
            .and_then(|headlines| headlines.render(count));

        match result {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "news fetch failed");
                NEWS_UNAVAILABLE.to_string()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct Headlines {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

impl Headlines {
    /// First `count` titled articles, one `"- {title}"` per line.
    fn render(&self, count: usize) -> Result<String, ServiceError> {
        let lines: Vec<String> = self
            .articles
            .iter()
            .filter_map(|a| a.title.as_deref())
            .take(count)
            .map(|title| format!("- {}", title))
            .collect();

        if lines.is_empty() {
            return Err(ServiceError::rejected("no headlines"));
        }
        Ok(lines.join("\n"))
    }
}
