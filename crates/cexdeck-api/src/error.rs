//! Gateway error type

use cexdeck_core::wire::ErrorBody;
use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for gateway operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of a single backend request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{detail} (HTTP {status})")]
    Status { status: u16, detail: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be decoded.
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        Self::Status {
            status,
            detail: detail.into(),
        }
    }

    /// Build the error for a non-2xx response from its raw body.
    ///
    /// Uses the backend's `detail` string when present, otherwise
    /// `"API Error: {reason phrase}"`.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail_text().map(str::to_string))
            .unwrap_or_else(|| {
                format!(
                    "API Error: {}",
                    status.canonical_reason().unwrap_or(status.as_str())
                )
            });
        Self::status(status.as_u16(), detail)
    }

    /// Text shown to the operator in a notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the backend answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}
