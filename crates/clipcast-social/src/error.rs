//! Error types for remote-service calls.

use thiserror::Error;

use crate::retry::RetryableError;

/// Result type for remote-service calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from the posting API, caption service, and upload endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote service answered with a non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport-level failure with no HTTP status.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Build a status error from a response body, preferring the upstream
    /// `error`/`message` fields when the body is JSON.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP {}", status));
        Self::Status { status, message }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl RetryableError for ApiError {
    /// Transient iff the remote call reported HTTP 429 or any 5xx.
    /// Transport errors without a status are permanent.
    fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == 429 || *status >= 500)
    }
}
