//! Provider availability cache.

use parley_core::{CapabilityProvider, ProbeReport, ProviderId};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Caches the most recent probe result per provider.
///
/// A provider that was never probed counts as unavailable.
#[derive(Debug, Default)]
pub struct HealthMonitor {
    cache: RwLock<BTreeMap<ProviderId, ProbeReport>>,
}

impl HealthMonitor {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes a provider and caches the result.
    #[instrument(skip(self, provider), fields(provider = %provider.id()))]
    pub async fn probe(&self, provider: &dyn CapabilityProvider) -> ProbeReport {
        let report = provider.probe().await;

        if report.available {
            if let Some(model) = &report.effective_model {
                warn!(model = %model, "Provider available with a substitute model");
            } else {
                info!("Provider available");
            }
        } else {
            warn!(reason = report.detail.as_deref().unwrap_or("unknown"), "Provider unavailable");
        }

        self.cache.write().await.insert(report.provider, report.clone());
        report
    }

    /// Returns the cached availability.
    pub async fn is_available(&self, provider: ProviderId) -> bool {
        self.cache
            .read()
            .await
            .get(&provider)
            .is_some_and(|r| r.available)
    }

    /// Returns the cached probe report.
    pub async fn last_report(&self, provider: ProviderId) -> Option<ProbeReport> {
        self.cache.read().await.get(&provider).cloned()
    }
}
