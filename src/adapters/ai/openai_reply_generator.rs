//! OpenAI Reply Generator - fallback replies from a chat completions API.
//!
//! Works with any OpenAI-compatible `/chat/completions` endpoint. Each request
//! carries the optional system prompt, the most recent slice of the
//! conversation history and the new utterance.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(Some(api_key))
//!     .with_model("gpt-4o-mini")
//!     .with_history_window(20);
//!
//! let generator = OpenAIReplyGenerator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::adapters::services::transport_error;
use crate::config::AiConfig;
use crate::domain::dispatch::{ChatHistory, ChatRole};
use crate::ports::{GeneratedReply, ReplyGenerator, ServiceError};

/// Reply when the model cannot be reached.
pub const GENERATOR_UNAVAILABLE: &str = "Sorry, I'm having trouble thinking of a reply right now.";

/// Configuration for the OpenAI reply generator.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Option<Secret<String>>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// History messages sent with each request.
    pub history_window: usize,
    /// Instructions sent ahead of the history.
    pub system_prompt: Option<String>,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: Option<Secret<String>>) -> Self {
        Self {
            api_key,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_tokens: 100,
            temperature: 0.7,
            history_window: 20,
            system_prompt: None,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how many history messages accompany each request.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }
}

impl From<&AiConfig> for OpenAIConfig {
    fn from(config: &AiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            history_window: config.history_window,
            system_prompt: config.system_prompt.clone(),
        }
    }
}

/// Reply generator backed by an OpenAI-compatible API.
pub struct OpenAIReplyGenerator {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIReplyGenerator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts the history and utterance to OpenAI's format.
    fn to_openai_request(&self, history: &ChatHistory, utterance: &str) -> OpenAIRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = self.config.system_prompt {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in history.recent(self.config.history_window) {
            messages.push(OpenAIMessage {
                role: match msg.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        messages.push(OpenAIMessage {
            role: "user".to_string(),
            content: utterance.to_string(),
        });

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        }
    }

    /// Sends a request and returns the generated text.
    async fn complete(&self, history: &ChatHistory, utterance: &str) -> Result<String, ServiceError> {
        let api_key = self
            .config
            .api_key()
            .ok_or(ServiceError::NotConfigured("ai.api_key"))?;
        let openai_request = self.to_openai_request(history, utterance);

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout.as_secs()))?;

        self.parse_response(response).await
    }

    /// Checks the status and extracts the first choice.
    async fn parse_response(&self, response: Response) -> Result<String, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::parse(format!("Failed to parse response: {}", e)))?;

        extract_reply(openai_response)
    }
}

/// First choice's content, trimmed; empty replies count as failures.
fn extract_reply(response: OpenAIResponse) -> Result<String, ServiceError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::parse("No choices in response"))?;

    let text = choice.message.content.trim().to_string();
    if text.is_empty() {
        return Err(ServiceError::parse("Empty completion"));
    }
    Ok(text)
}

#[async_trait]
impl ReplyGenerator for OpenAIReplyGenerator {
    async fn generate_reply(&self, history: &ChatHistory, utterance: &str) -> GeneratedReply {
        match self.complete(history, utterance).await {
            Ok(text) => {
                let history = history.with_exchange(utterance, text.as_str());
                GeneratedReply::new(text, history)
            }
            Err(err) => {
                tracing::warn!(error = %err, model = %self.config.model, "reply generation failed");
                GeneratedReply::new(GENERATOR_UNAVAILABLE, history.clone())
            }
        }
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}
