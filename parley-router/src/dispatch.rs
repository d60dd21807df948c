//! Calls, attempts and routed results.

use futures::future::BoxFuture;
use parley_core::{ProviderError, ProviderId, Tier};
use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::error::{Rejection, RouterError};

// ============================================================================
// Call
// ============================================================================

/// A not-yet-started provider call bound to the provider that will serve it.
///
/// The future does nothing until the router awaits it, so a fallback call
/// that is never needed is never sent.
pub struct Call<'a, T> {
    provider: ProviderId,
    future: BoxFuture<'a, Result<T, ProviderError>>,
}

impl<'a, T> Call<'a, T> {
    /// Binds a call future to a provider.
    pub fn new<F>(provider: ProviderId, future: F) -> Self
    where
        F: Future<Output = Result<T, ProviderError>> + Send + 'a,
    {
        Self {
            provider,
            future: Box::pin(future),
        }
    }

    /// Provider that serves this call.
    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub(crate) async fn run(self) -> Result<T, ProviderError> {
        self.future.await
    }
}

impl<T> fmt::Debug for Call<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call").field("provider", &self.provider).finish_non_exhaustive()
    }
}

// ============================================================================
// Attempt
// ============================================================================

/// Record of one provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Provider called.
    pub provider: ProviderId,
    /// Whether its result was accepted.
    pub accepted: bool,
    /// Rejection, if not accepted.
    pub rejection: Option<Rejection>,
    /// How long the call took.
    pub duration: Duration,
}

impl Attempt {
    /// Creates an accepted attempt record.
    pub fn accepted(provider: ProviderId, duration: Duration) -> Self {
        Self {
            provider,
            accepted: true,
            rejection: None,
            duration,
        }
    }

    /// Creates a rejected attempt record.
    pub fn rejected(provider: ProviderId, rejection: Rejection, duration: Duration) -> Self {
        Self {
            provider,
            accepted: false,
            rejection: Some(rejection),
            duration,
        }
    }
}

// ============================================================================
// Routed
// ============================================================================

/// A result together with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Routed<T> {
    /// The result.
    pub value: T,
    /// Tier that produced the result.
    pub served_by: Tier,
    /// Provider calls made, in order. Empty for pre-checked inputs.
    pub attempts: Vec<Attempt>,
}

impl<T> Routed<T> {
    /// A result produced without any provider call.
    pub fn deterministic(value: T) -> Self {
        Self {
            value,
            served_by: Tier::Deterministic,
            attempts: Vec::new(),
        }
    }

    /// Returns true if the deterministic tier produced the result.
    pub fn is_deterministic(&self) -> bool {
        self.served_by == Tier::Deterministic
    }

    /// Returns true if a second provider was called.
    pub fn used_fallback(&self) -> bool {
        self.attempts.len() > 1
    }

    /// Discards the routing metadata.
    pub fn into_value(self) -> T {
        self.value
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of executing a primary call and its optional fallback.
#[derive(Debug)]
pub struct Outcome<T> {
    /// Accepted value with the provider that produced it, or the final error.
    pub result: Result<(T, ProviderId), RouterError>,
    /// All calls made.
    pub attempts: Vec<Attempt>,
}

impl<T> Outcome<T> {
    /// Converts into a routed result.
    ///
    /// # Errors
    ///
    /// Returns the final [`RouterError`] if no result was accepted.
    pub fn into_routed(self) -> Result<Routed<T>, RouterError> {
        let (value, provider) = self.result?;
        Ok(Routed {
            value,
            served_by: provider.into(),
            attempts: self.attempts,
        })
    }
}
