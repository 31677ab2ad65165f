//! Failure types for service checks

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckFailure {
    #[error("AI Service is not running at {url}")]
    ServiceUnavailable { url: String },

    #[error("{endpoint}: expected status {expected}, got {actual}")]
    UnexpectedStatus {
        endpoint: String,
        expected: String,
        actual: u16,
    },

    #[error("{endpoint}: malformed response: {reason}")]
    MalformedBody { endpoint: String, reason: String },

    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, CheckFailure>;

impl CheckFailure {
    pub fn unexpected_status(endpoint: &str, expected: impl Into<String>, actual: u16) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn malformed(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::MalformedBody {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }
}
