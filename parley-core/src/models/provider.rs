//! Provider-related types.
//!
//! This module contains types related to the two backends:
//! - [`ProviderId`] - Identity of a backend
//! - [`Tier`] - Which tier of the chain served a result
//! - [`ProviderInfo`] - Configuration echo for status output
//! - [`Preference`] - Operator-configured primary and fallback flag
//! - [`EmptyResultPolicy`] - How empty provider output is treated

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Provider Id
// ============================================================================

/// The two interchangeable backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Locally-hosted inference service (Ollama-compatible).
    Local,
    /// Cloud inference API (Gemini-compatible).
    Cloud,
}

impl ProviderId {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Local => "Local (Ollama)",
            Self::Cloud => "Cloud (Gemini)",
        }
    }

    /// Returns the CLI name for this provider.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Cloud => "cloud",
        }
    }

    /// Returns both providers in preference-neutral order.
    pub fn all() -> &'static [ProviderId] {
        &[Self::Local, Self::Cloud]
    }

    /// Returns the other provider.
    pub fn other(self) -> Self {
        match self {
            Self::Local => Self::Cloud,
            Self::Cloud => Self::Local,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for ProviderId {
    type Err = CoreError;

    /// Parses `local`/`cloud`, also accepting the backend names
    /// `ollama`/`gemini`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "ollama" => Ok(Self::Local),
            "cloud" | "gemini" => Ok(Self::Cloud),
            other => Err(CoreError::UnknownProvider(other.to_string())),
        }
    }
}

// ============================================================================
// Tier
// ============================================================================

/// A position in the `deterministic → local → cloud` chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Answered without any provider (pre-check or recovery default).
    Deterministic,
    /// Served by the local provider.
    Local,
    /// Served by the cloud provider.
    Cloud,
}

impl Tier {
    /// Returns the provider behind this tier, if any.
    pub fn provider(self) -> Option<ProviderId> {
        match self {
            Self::Deterministic => None,
            Self::Local => Some(ProviderId::Local),
            Self::Cloud => Some(ProviderId::Cloud),
        }
    }
}

impl From<ProviderId> for Tier {
    fn from(id: ProviderId) -> Self {
        match id {
            ProviderId::Local => Self::Local,
            ProviderId::Cloud => Self::Cloud,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deterministic => f.write_str("deterministic"),
            Self::Local => f.write_str("local"),
            Self::Cloud => f.write_str("cloud"),
        }
    }
}

// ============================================================================
// Provider Info
// ============================================================================

/// Configuration echo for a provider.
///
/// Opaque to the router beyond display; the credential itself is never
/// included, only whether one is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider identity.
    pub id: ProviderId,
    /// Base endpoint URL.
    pub endpoint: String,
    /// Configured model name.
    pub model: String,
    /// Model actually in use (differs when the probe degraded to another model).
    pub effective_model: String,
    /// Whether this provider needs a credential.
    pub credential_required: bool,
    /// Whether a non-blank credential is configured.
    pub credential_present: bool,
    /// Environment variable the credential is read from.
    pub credential_env: Option<String>,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

// ============================================================================
// Preference
// ============================================================================

/// Operator-configured routing preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Provider tried first.
    pub primary: ProviderId,
    /// Whether the other provider may be used when the primary fails.
    pub fallback_enabled: bool,
}

impl Preference {
    /// Creates a preference.
    pub fn new(primary: ProviderId, fallback_enabled: bool) -> Self {
        Self {
            primary,
            fallback_enabled,
        }
    }
}

impl Default for Preference {
    fn default() -> Self {
        Self::new(ProviderId::Local, true)
    }
}

// ============================================================================
// Empty Result Policy
// ============================================================================

/// How a successful-but-empty provider result is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyResultPolicy {
    /// Empty content is a rejection and triggers fallback.
    #[default]
    Reject,
    /// Empty content is a legitimate answer.
    Accept,
}

impl EmptyResultPolicy {
    /// Returns true if a result with the given emptiness must be rejected.
    pub fn rejects(self, is_empty: bool) -> bool {
        is_empty && self == Self::Reject
    }
}

impl FromStr for EmptyResultPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "accept" => Ok(Self::Accept),
            other => Err(CoreError::InvalidInput(format!(
                "empty result policy must be 'reject' or 'accept', got '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
