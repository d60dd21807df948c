//! Usage counters.

use parley_core::{ProviderId, StatsSnapshot};
use tokio::sync::Mutex;
use tracing::debug;

/// Per-provider request counters, fallback count and last provider used.
///
/// Updates are serialized through a mutex so concurrent operations never
/// lose an increment. Readers get a copy.
#[derive(Debug, Default)]
pub struct UsageStats {
    inner: Mutex<StatsSnapshot>,
}

impl UsageStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dispatch to `provider`.
    pub async fn record_request(&self, provider: ProviderId) {
        let mut stats = self.inner.lock().await;
        *stats.requests_by_provider.entry(provider).or_insert(0) += 1;
        stats.last_used = Some(provider);
        debug!(provider = %provider, total = stats.requests(provider), "Recorded request");
    }

    /// Records a dispatch to `provider` made because another provider could
    /// not serve the operation.
    pub async fn record_fallback(&self, provider: ProviderId) {
        let mut stats = self.inner.lock().await;
        *stats.requests_by_provider.entry(provider).or_insert(0) += 1;
        stats.fallback_count += 1;
        stats.last_used = Some(provider);
        debug!(provider = %provider, fallbacks = stats.fallback_count, "Recorded fallback");
    }

    /// Returns a copy of the counters.
    pub async fn snapshot(&self) -> StatsSnapshot {
        self.inner.lock().await.clone()
    }
}
