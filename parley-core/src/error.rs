//! Core error types for Parley.

use thiserror::Error;

/// Core error type for input validation and parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Provider name did not match a known provider.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Caller supplied an argument outside the operation's contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error returned by a single provider call.
///
/// The router treats every variant as a rejection of the call. The
/// [`Malformed`](Self::Malformed) and [`Empty`](Self::Empty) variants are
/// additionally recoverable with a deterministic default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Provider is not usable (not reachable, no credential).
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Network-level failure (connect, DNS, reset).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded the provider's timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Provider answered with a non-success HTTP status.
    #[error("Unexpected status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt or reason.
        message: String,
    },

    /// Reply could not be parsed into the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Reply was empty (blank text, `{}` or `[]`).
    #[error("Empty response")]
    Empty,
}

impl ProviderError {
    /// Returns true if the provider answered but the content was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Empty)
    }

    /// Returns true for network, timeout and status failures.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout(_) | Self::Status { .. }
        )
    }
}
