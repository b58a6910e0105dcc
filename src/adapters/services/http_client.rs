//! Shared reqwest plumbing for the content service adapters.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::ports::ServiceError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds a client whose every request is bounded by `timeout`.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ServiceError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Classifies a reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error, timeout_secs: u64) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout { timeout_secs }
    } else if err.is_decode() {
        ServiceError::parse(err.to_string())
    } else if err.is_connect() {
        ServiceError::network(format!("Connection failed: {}", err))
    } else {
        ServiceError::network(err.to_string())
    }
}

/// Sends `request`, requires a 2xx status and decodes the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    timeout_secs: u64,
) -> Result<T, ServiceError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(e, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ServiceError::parse(format!("Failed to parse response: {}", e)))
}
