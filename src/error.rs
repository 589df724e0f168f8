//! wistia-embed error types

use std::time::Duration;

/// wistia-embed error types
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("video not found: {0}")]
    VideoNotFound(String),

    #[error("invalid video id: '{0}'")]
    InvalidVideoId(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("no API key defined")]
    MissingApiKey,

    #[error("malformed API key: keys must be hexadecimal")]
    MalformedApiKey,

    /// The parameter schema is malformed. Raised once, at load time.
    #[error("schema error: {0}")]
    Schema(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    // Resolution errors
    /// A field the caller must supply on the video record is absent.
    #[error("video record is missing '{0}'")]
    MissingVideoField(&'static str),

    #[error("unknown field modifier: {0}")]
    UnknownModifier(String),

    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),
}

impl EmbedError {
    /// Whether retrying the same request might succeed.
    ///
    /// Network failures, rate limiting, and 5xx responses are transient.
    /// Everything else (bad credentials, missing videos, bad input) is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Server-provided retry hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EmbedError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            EmbedError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            EmbedError::InvalidInput(format!("undecodable API response: {err}"))
        } else {
            EmbedError::Http(err.to_string())
        }
    }
}

/// Result type alias for wistia-embed operations
pub type Result<T> = std::result::Result<T, EmbedError>;
