//! OpenWeatherMap adapter - current conditions in metric units.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{ServiceError, WeatherService};

use super::http_client::{build_client, get_json};

/// Reply when the city is unknown or the service is unreachable.
pub const WEATHER_UNAVAILABLE: &str =
    "I couldn't fetch the weather for that location. Please check the city name.";

/// Client for the OpenWeatherMap `weather` endpoint.
pub struct OpenWeatherClient {
    url: String,
    api_key: Option<Secret<String>>,
    timeout: Duration,
    client: Client,
}

impl OpenWeatherClient {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<Secret<String>>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            url: url.into(),
            api_key,
            timeout,
            client: build_client(timeout)?,
        })
    }

    async fn current(&self, city: &str) -> Result<CurrentWeather, ServiceError> {
        let api_key = self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
            .ok_or(ServiceError::NotConfigured("services.weather_api_key"))?;

        let request = self.client.get(&self.url).query(&[
            ("q", city),
            ("units", "metric"),
            ("appid", api_key),
        ]);
        get_json(request, self.timeout.as_secs()).await
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    async fn fetch_weather(&self, city: &str) -> String {
        if city.is_empty() {
            tracing::debug!("weather requested without a city");
            return WEATHER_UNAVAILABLE.to_string();
        }

        match self.current(city).await.and_then(|w| w.render(city)) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(error = %err, city, "weather fetch failed");
                WEATHER_UNAVAILABLE.to_string()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    weather: Vec<Condition>,
    main: Readings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Readings {
    temp: f64,
}

impl CurrentWeather {
    fn render(&self, city: &str) -> Result<String, ServiceError> {
        let condition = self
            .weather
            .first()
            .ok_or_else(|| ServiceError::parse("No weather conditions in response"))?;
        Ok(format!(
            "The weather in {} is currently {} with a temperature of {}°C.",
            city, condition.description, self.main.temp
        ))
    }
}
