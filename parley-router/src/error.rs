//! Router error types.

use parley_core::{ProviderError, ProviderId};
use std::fmt;
use thiserror::Error;

use crate::operation::Operation;

/// Why a provider result was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The call failed.
    Failed(ProviderError),
    /// The call succeeded with content-empty output.
    EmptyResult,
}

impl Rejection {
    /// Returns true if a deterministic default may stand in for the result.
    ///
    /// Unusable content qualifies; transport, timeout, status and
    /// availability failures do not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Rejection::Failed(e) => e.is_malformed(),
            Rejection::EmptyResult => true,
        }
    }

    /// Returns the provider error, if the call failed.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Rejection::Failed(e) => Some(e),
            Rejection::EmptyResult => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Failed(e) => write!(f, "{e}"),
            Rejection::EmptyResult => f.write_str("empty result"),
        }
    }
}

impl From<ProviderError> for Rejection {
    fn from(e: ProviderError) -> Self {
        Rejection::Failed(e)
    }
}

/// Errors returned by router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Argument outside the operation's contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The only provider tried rejected the call and no fallback was run.
    #[error("{operation} failed on {provider}: {rejection}")]
    Rejected {
        /// Operation that failed.
        operation: Operation,
        /// Provider that was tried.
        provider: ProviderId,
        /// Why its result was rejected.
        rejection: Rejection,
    },

    /// Both providers rejected the call; carries the fallback's rejection.
    #[error("{operation} failed on every provider, last {provider}: {rejection}")]
    Terminal {
        /// Operation that failed.
        operation: Operation,
        /// Fallback provider, tried last.
        provider: ProviderId,
        /// Why the fallback's result was rejected.
        rejection: Rejection,
    },
}

impl RouterError {
    /// Returns the final rejection, if the error came from a provider.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            RouterError::InvalidInput(_) => None,
            RouterError::Rejected { rejection, .. } | RouterError::Terminal { rejection, .. } => {
                Some(rejection)
            }
        }
    }

    /// Returns true if a deterministic default may stand in for the result.
    pub fn is_recoverable(&self) -> bool {
        self.rejection().is_some_and(Rejection::is_recoverable)
    }

    /// Returns true if both providers were tried.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RouterError::Terminal { .. })
    }
}
