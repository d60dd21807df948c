//! Reachability probes for health checks.

use futures::future::join_all;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::http::HttpClient;

/// Default probe timeout.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Result of a probe check.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Whether the endpoint answered with a success status.
    pub success: bool,
    /// Response time in milliseconds.
    pub response_time_ms: u64,
    /// Status code, if a response arrived.
    pub status_code: Option<u16>,
    /// Decoded JSON body of a successful response, if it was JSON.
    pub body: Option<serde_json::Value>,
    /// Error message, if the probe failed.
    pub error: Option<String>,
}

impl ProbeResult {
    fn failed(start: Instant, status_code: Option<u16>, error: String) -> Self {
        Self {
            success: false,
            response_time_ms: elapsed_ms(start),
            status_code,
            body: None,
            error: Some(error),
        }
    }
}

/// A probe for checking endpoint availability.
#[derive(Debug, Clone)]
pub struct Probe {
    /// The URL to probe.
    pub url: String,
    /// Request timeout, applied per probe.
    pub timeout: Duration,
}

impl Probe {
    /// Creates a new probe for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }

    /// Sets the timeout for this probe.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Executes the probe. Never fails: errors are reported in the result.
    pub async fn check(&self, client: &HttpClient) -> ProbeResult {
        let start = Instant::now();

        debug!(url = %self.url, "Running probe");

        let response = match client.get_with_timeout(&self.url, self.timeout).await {
            Ok(response) => response,
            Err(e) => return ProbeResult::failed(start, None, e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return ProbeResult::failed(
                start,
                Some(status.as_u16()),
                format!("unexpected status {status}"),
            );
        }

        let body = response.json::<serde_json::Value>().await.ok();
        ProbeResult {
            success: true,
            response_time_ms: elapsed_ms(start),
            status_code: Some(status.as_u16()),
            body,
            error: None,
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Runs multiple probes concurrently.
pub async fn run_probes(probes: &[Probe], client: &HttpClient) -> Vec<ProbeResult> {
    let futures: Vec<_> = probes.iter().map(|p| p.check(client)).collect();
    join_all(futures).await
}
