//! Transport-level failure shared by the outbound service adapters.

use thiserror::Error;

/// Why a call to a third-party service failed.
///
/// Adapters log this and turn it into a fixed, user-safe message; it never
/// reaches the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Connection or I/O failure.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service answered but reported a failure of its own.
    #[error("service rejected request: {0}")]
    Rejected(String),

    /// A required setting (usually an API key) is missing.
    #[error("not configured: {0}")]
    NotConfigured(&'static str),
}

impl ServiceError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}
