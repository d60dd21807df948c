//! Retry strategies for provider requests.

use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;

/// Strategy for retrying failed requests.
///
/// The default makes a single attempt; the router already provides
/// cross-provider fallback, so in-provider retries are opt-in.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay between retries in milliseconds.
    pub base_delay_ms: u64,
    /// Whether to use exponential backoff.
    pub exponential_backoff: bool,
    /// Maximum delay between retries in milliseconds.
    pub max_delay_ms: u64,
}

impl RetryStrategy {
    /// Creates a new retry strategy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms: 1_000,
            exponential_backoff: true,
            max_delay_ms: 60_000,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
            exponential_backoff: false,
            max_delay_ms: 0,
        }
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enables or disables exponential backoff.
    #[must_use]
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Calculates the delay before a given retry (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            self.base_delay_ms
                .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)))
        } else {
            self.base_delay_ms
        };

        Duration::from_millis(delay.min(self.max_delay_ms))
    }

    /// Determines if an error should be retried.
    pub fn should_retry(&self, error: &FetchError) -> bool {
        error.is_retryable()
    }

    /// Runs `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns the last error produced by `op`.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && self.should_retry(&e) => {
                    let delay = self.delay_for_attempt(attempt);
                    debug!(attempt, delay_ms = delay.as_millis(), error = %e, "Retrying request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::no_retry()
    }
}
