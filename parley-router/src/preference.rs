//! Routing preference with a restorable startup default.

use parley_core::{Preference, ProviderId};
use tokio::sync::RwLock;
use tracing::info;

/// Current routing preference plus the value captured at startup.
#[derive(Debug)]
pub struct PreferenceStore {
    current: RwLock<Preference>,
    default: Preference,
}

impl PreferenceStore {
    /// Creates a store whose startup default is `initial`.
    pub fn new(initial: Preference) -> Self {
        Self {
            current: RwLock::new(initial),
            default: initial,
        }
    }

    /// Returns the current preference.
    pub async fn get(&self) -> Preference {
        *self.current.read().await
    }

    /// Returns the startup preference.
    pub fn default_preference(&self) -> Preference {
        self.default
    }

    /// Makes `provider` the primary.
    pub async fn set_primary(&self, provider: ProviderId) {
        let mut current = self.current.write().await;
        if current.primary != provider {
            info!(from = %current.primary, to = %provider, "Primary provider changed");
        }
        current.primary = provider;
    }

    /// Restores the startup preference.
    pub async fn reset(&self) -> Preference {
        let mut current = self.current.write().await;
        *current = self.default;
        info!(primary = %current.primary, fallback = current.fallback_enabled, "Preference reset");
        *current
    }
}
