//! Router status and health types.
//!
//! This module contains the read-only views the router exposes:
//! - [`ProbeReport`] - Outcome of one availability probe
//! - [`ProviderHealth`] - Cached availability plus configuration echo
//! - [`StatsSnapshot`] - Usage counters at a point in time
//! - [`RouterStatus`] - Availability, preference and usage in one view
//! - [`HealthReport`] - Overall health with operator recommendations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::provider::{EmptyResultPolicy, Preference, ProviderId, ProviderInfo};

// ============================================================================
// Probe Report
// ============================================================================

/// Outcome of probing a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Provider probed.
    pub provider: ProviderId,
    /// Whether the provider is usable.
    pub available: bool,
    /// Reason for unavailability, or a note about degraded operation.
    pub detail: Option<String>,
    /// Model in use when it differs from the configured one.
    pub effective_model: Option<String>,
    /// When the probe ran.
    pub checked_at: DateTime<Utc>,
}

impl ProbeReport {
    /// Creates a successful probe report.
    pub fn available(provider: ProviderId) -> Self {
        Self {
            provider,
            available: true,
            detail: None,
            effective_model: None,
            checked_at: Utc::now(),
        }
    }

    /// Creates a failed probe report.
    pub fn unavailable(provider: ProviderId, reason: impl Into<String>) -> Self {
        Self {
            provider,
            available: false,
            detail: Some(reason.into()),
            effective_model: None,
            checked_at: Utc::now(),
        }
    }

    /// Sets the effective model.
    #[must_use]
    pub fn with_effective_model(mut self, model: impl Into<String>) -> Self {
        self.effective_model = Some(model.into());
        self
    }

    /// Sets the detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ============================================================================
// Provider Health
// ============================================================================

/// Cached availability of one provider plus its configuration echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Provider identity.
    pub id: ProviderId,
    /// Cached availability from the last probe.
    pub available: bool,
    /// Configuration echo.
    pub info: ProviderInfo,
    /// Detail from the last probe.
    pub detail: Option<String>,
    /// When the provider was last probed.
    pub last_probe: Option<DateTime<Utc>>,
}

// ============================================================================
// Usage Statistics
// ============================================================================

/// Point-in-time copy of the router's usage counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Requests dispatched per provider.
    pub requests_by_provider: BTreeMap<ProviderId, u64>,
    /// Number of times a fallback provider was used.
    pub fallback_count: u64,
    /// Provider of the most recent dispatch.
    pub last_used: Option<ProviderId>,
}

impl StatsSnapshot {
    /// Requests dispatched to a provider.
    pub fn requests(&self, provider: ProviderId) -> u64 {
        self.requests_by_provider.get(&provider).copied().unwrap_or(0)
    }

    /// Requests dispatched across all providers.
    pub fn total_requests(&self) -> u64 {
        self.requests_by_provider.values().sum()
    }
}

// ============================================================================
// Router Status
// ============================================================================

/// Availability, preference and usage of a router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterStatus {
    /// Both providers, local first.
    pub providers: Vec<ProviderHealth>,
    /// Current preference.
    pub preference: Preference,
    /// Preference captured at startup, restored by reset.
    pub default_preference: Preference,
    /// Emptiness policy in force.
    pub empty_results: EmptyResultPolicy,
    /// Usage counters.
    pub stats: StatsSnapshot,
}

impl RouterStatus {
    /// Returns the entry for a provider.
    pub fn provider(&self, id: ProviderId) -> Option<&ProviderHealth> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Returns true if the provider's cached availability is true.
    pub fn is_available(&self, id: ProviderId) -> bool {
        self.provider(id).is_some_and(|p| p.available)
    }
}

// ============================================================================
// Health Report
// ============================================================================

/// Overall health: healthy if at least one provider is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    /// At least one provider is available.
    Healthy,
    /// No provider is available.
    Unhealthy,
}

impl fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => f.write_str("healthy"),
            Self::Unhealthy => f.write_str("unhealthy"),
        }
    }
}

/// Health view with operator recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall health.
    pub overall: OverallHealth,
    /// Per-provider availability.
    pub providers: Vec<ProviderHealth>,
    /// Current preference.
    pub preference: Preference,
    /// Suggested operator actions.
    pub recommendations: Vec<String>,
    /// When the report was built.
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// Builds a report from a status view.
    pub fn from_status(status: &RouterStatus) -> Self {
        let local = status.is_available(ProviderId::Local);
        let cloud = status.is_available(ProviderId::Cloud);

        let overall = if local || cloud {
            OverallHealth::Healthy
        } else {
            OverallHealth::Unhealthy
        };

        let api_key_env = status
            .provider(ProviderId::Cloud)
            .and_then(|p| p.info.credential_env.as_deref())
            .unwrap_or("the cloud API key");

        let mut recommendations = Vec::new();
        match (local, cloud) {
            (false, false) => recommendations.push(
                "CRITICAL: No providers available. Check the local Ollama service and the cloud API key."
                    .to_string(),
            ),
            (false, true) => recommendations.push(
                "Local provider not available. Install Ollama and pull a model for local processing."
                    .to_string(),
            ),
            (true, false) => recommendations.push(format!(
                "Cloud provider not available. Set {api_key_env} to enable cloud fallback."
            )),
            (true, true) => recommendations.push(
                "Both providers available. Optimal configuration for reliability.".to_string(),
            ),
        }

        let primary = status.preference.primary;
        if !status.is_available(primary) {
            recommendations.push(format!(
                "Configured to prefer {} but it is not available. Consider switching preference.",
                primary.display_name()
            ));
        }

        Self {
            overall,
            providers: status.providers.clone(),
            preference: status.preference,
            recommendations,
            checked_at: Utc::now(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn health(id: ProviderId, available: bool) -> ProviderHealth {
        ProviderHealth {
            id,
            available,
            info: ProviderInfo {
                id,
                endpoint: "http://localhost".into(),
                model: "m".into(),
                effective_model: "m".into(),
                credential_required: id == ProviderId::Cloud,
                credential_present: available,
                credential_env: (id == ProviderId::Cloud).then(|| "GEMINI_API_KEY".to_string()),
                timeout_secs: 30,
            },
            detail: None,
            last_probe: None,
        }
    }

    fn status(local: bool, cloud: bool, primary: ProviderId) -> RouterStatus {
        RouterStatus {
            providers: vec![
                health(ProviderId::Local, local),
                health(ProviderId::Cloud, cloud),
            ],
            preference: Preference::new(primary, true),
            default_preference: Preference::default(),
            empty_results: EmptyResultPolicy::Reject,
            stats: StatsSnapshot::default(),
        }
    }

    #[test]
    fn test_both_down_is_critical() {
        let report = HealthReport::from_status(&status(false, false, ProviderId::Local));
        assert_eq!(report.overall, OverallHealth::Unhealthy);
        assert!(report.recommendations[0].starts_with("CRITICAL"));
        assert_eq!(report.recommendations.len(), 2);
    }

    #[test]
    fn test_cloud_down_names_key_variable() {
        let report = HealthReport::from_status(&status(true, false, ProviderId::Local));
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_one_up_is_healthy() {
        let report = HealthReport::from_status(&status(false, true, ProviderId::Cloud));
        assert_eq!(report.overall, OverallHealth::Healthy);
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].contains("Install Ollama"));
    }

    #[test]
    fn test_preferred_down_suggests_switch() {
        let report = HealthReport::from_status(&status(false, true, ProviderId::Local));
        assert!(
            report
                .recommendations
                .iter()
                .any(|r| r.contains("Consider switching preference"))
        );
    }

    #[test]
    fn test_both_up_is_optimal() {
        let report = HealthReport::from_status(&status(true, true, ProviderId::Local));
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].contains("Optimal"));
    }

    #[test]
    fn test_stats_snapshot_counts() {
        let mut stats = StatsSnapshot::default();
        stats.requests_by_provider.insert(ProviderId::Cloud, 2);
        assert_eq!(stats.requests(ProviderId::Cloud), 2);
        assert_eq!(stats.requests(ProviderId::Local), 0);
        assert_eq!(stats.total_requests(), 2);
    }
}
