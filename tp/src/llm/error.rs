//! Request error types

use std::time::Duration;
use thiserror::Error;

/// Errors from talking to the generative-text service
#[derive(Debug, Error)]
pub enum RequestError {
    /// Every attempt was used up (the last one was rate limited)
    #[error("Request failed after {attempts} attempts: retries exhausted")]
    Exhausted { attempts: u32 },

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RequestError {
    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, RequestError::Http { status: 429, .. })
    }

    /// Check if this error came from the transport rather than the service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RequestError::Network(_) | RequestError::Connection(_) | RequestError::Timeout(_)
        )
    }

    /// Worth another attempt under a strict retry policy
    pub fn is_retryable(&self) -> bool {
        match self {
            RequestError::Http { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            _ => self.is_transport(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
