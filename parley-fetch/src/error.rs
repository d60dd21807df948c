//! Fetch error types.

use parley_core::ProviderError;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for a complete request/response exchange.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Server answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after: Option<u64>,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// Returns true if a retry may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::RateLimited { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Http(HttpError::Request(e)) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

// Network and status failures are transport problems; shape problems are
// malformed replies the router may recover from deterministically.
impl From<FetchError> for ProviderError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout(secs) => ProviderError::Timeout(secs),
            FetchError::Status { status, body } => ProviderError::Status {
                status,
                message: body,
            },
            FetchError::RateLimited { .. } => ProviderError::Status {
                status: 429,
                message: "rate limited".to_string(),
            },
            FetchError::Http(e) => ProviderError::Transport(e.to_string()),
            FetchError::Json(e) => ProviderError::Malformed(e.to_string()),
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl From<url::ParseError> for HttpError {
    fn from(err: url::ParseError) -> Self {
        HttpError::InvalidUrl(err.to_string())
    }
}
