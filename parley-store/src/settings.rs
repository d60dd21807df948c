//! Parley settings.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. The JSON settings file (`~/.config/parley/settings.json`)
//! 3. Environment variables
//!
//! ## Environment Variables
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `PARLEY_PRIMARY` | `routing.primary` (`local` / `cloud`) |
//! | `PARLEY_FALLBACK` | `routing.fallback_enabled` |
//! | `PARLEY_EMPTY_RESULTS` | `routing.empty_results` (`reject` / `accept`) |
//! | `PREFER_OLLAMA` | `routing.primary` when `PARLEY_PRIMARY` is unset |
//! | `FALLBACK_TO_GEMINI` | `routing.fallback_enabled` when `PARLEY_FALLBACK` is unset |
//! | `OLLAMA_BASE_URL` / `OLLAMA_MODEL` / `OLLAMA_TIMEOUT` | `local.*` |
//! | `GEMINI_BASE_URL` / `GEMINI_MODEL` | `cloud.*` |
//! | value of `cloud.api_key_env` (default `GEMINI_API_KEY`) | cloud API key |
//!
//! The API key is only ever read from the environment and never written.

use parley_core::{EmptyResultPolicy, Preference, ProviderId};
use parley_providers::config::{
    DEFAULT_API_KEY_ENV, DEFAULT_CLOUD_BASE_URL, DEFAULT_CLOUD_MODEL, DEFAULT_LOCAL_BASE_URL,
    DEFAULT_LOCAL_MODEL, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use parley_providers::{CloudConfig, LocalConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// All Parley settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Provider preference and result policy.
    pub routing: RoutingSettings,
    /// Local provider.
    pub local: LocalSettings,
    /// Cloud provider.
    pub cloud: CloudSettings,
    /// Log level used when no `RUST_LOG` or CLI flag overrides it.
    pub log_level: LogLevel,
}

/// Routing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Preferred provider.
    pub primary: ProviderId,
    /// Whether the other provider is tried when the preferred one fails.
    pub fallback_enabled: bool,
    /// Whether empty provider output counts as a failure.
    pub empty_results: EmptyResultPolicy,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        let preference = Preference::default();
        Self {
            primary: preference.primary,
            fallback_enabled: preference.fallback_enabled,
            empty_results: EmptyResultPolicy::default(),
        }
    }
}

/// Local provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSettings {
    /// Base URL of the Ollama-compatible service.
    pub base_url: String,
    /// Preferred model.
    pub model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
    /// Availability probe timeout in seconds.
    pub probe_timeout_secs: u64,
    /// Attempts per call, including the first.
    pub max_attempts: u32,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOCAL_BASE_URL.to_string(),
            model: DEFAULT_LOCAL_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            max_attempts: 1,
        }
    }
}

/// Cloud provider settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudSettings {
    /// Base URL of the Gemini-compatible API.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
    /// Attempts per call, including the first.
    pub max_attempts: u32,
    /// API key resolved from `api_key_env`.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CLOUD_BASE_URL.to_string(),
            model: DEFAULT_CLOUD_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: 1,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for CloudSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key_env", &self.api_key_env)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    #[default]
    Warn,
    /// Informational.
    Info,
    /// Debug output.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Loading
// ============================================================================

impl Settings {
    /// Loads settings from `path` and overlays the process environment.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be parsed or an environment
    /// variable holds an invalid value.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let mut settings = Self::load_file(path).await?;
        settings.apply_env(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    /// Loads settings from `path` only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or parsed.
    pub async fn load_file(path: &Path) -> Result<Self, StoreError> {
        match load_json::<Settings>(path).await {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded settings");
                Ok(settings)
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "No settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Overlays environment variables obtained from `lookup`.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidEnv`] for values that do not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(value) = var("PARLEY_PRIMARY") {
            self.routing.primary = parse_env("PARLEY_PRIMARY", &value)?;
        } else if let Some(value) = var("PREFER_OLLAMA") {
            self.routing.primary = if parse_bool("PREFER_OLLAMA", &value)? {
                ProviderId::Local
            } else {
                ProviderId::Cloud
            };
        }

        if let Some(value) = var("PARLEY_FALLBACK") {
            self.routing.fallback_enabled = parse_bool("PARLEY_FALLBACK", &value)?;
        } else if let Some(value) = var("FALLBACK_TO_GEMINI") {
            self.routing.fallback_enabled = parse_bool("FALLBACK_TO_GEMINI", &value)?;
        }

        if let Some(value) = var("PARLEY_EMPTY_RESULTS") {
            self.routing.empty_results = parse_env("PARLEY_EMPTY_RESULTS", &value)?;
        }

        if let Some(value) = var("OLLAMA_BASE_URL") {
            self.local.base_url = value;
        }
        if let Some(value) = var("OLLAMA_MODEL") {
            self.local.model = value;
        }
        if let Some(value) = var("OLLAMA_TIMEOUT") {
            self.local.timeout_secs = parse_env("OLLAMA_TIMEOUT", &value)?;
        }

        if let Some(value) = var("GEMINI_BASE_URL") {
            self.cloud.base_url = value;
        }
        if let Some(value) = var("GEMINI_MODEL") {
            self.cloud.model = value;
        }
        self.cloud.api_key = var(&self.cloud.api_key_env);

        debug!(
            primary = %self.routing.primary,
            fallback = self.routing.fallback_enabled,
            cloud_key = self.cloud.api_key.is_some(),
            "Applied environment overrides"
        );
        Ok(())
    }

    /// Writes the settings to `path` (the API key is never written).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on IO or serialization failure.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Writes default settings to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the file exists and `force`
    /// is false.
    pub async fn init(path: &Path, force: bool) -> Result<Self, StoreError> {
        if !force && tokio::fs::try_exists(path).await? {
            return Err(StoreError::AlreadyExists(path.display().to_string()));
        }
        let settings = Self::default();
        settings.save(path).await?;
        Ok(settings)
    }

    // ========================================================================
    // Derived configuration
    // ========================================================================

    /// Routing preference at startup.
    pub fn preference(&self) -> Preference {
        Preference::new(self.routing.primary, self.routing.fallback_enabled)
    }

    /// Local provider configuration.
    pub fn local_config(&self) -> LocalConfig {
        LocalConfig {
            base_url: self.local.base_url.clone(),
            model: self.local.model.clone(),
            timeout_secs: self.local.timeout_secs,
            probe_timeout_secs: self.local.probe_timeout_secs,
            max_attempts: self.local.max_attempts.max(1),
        }
    }

    /// Cloud provider configuration, including the resolved API key.
    pub fn cloud_config(&self) -> CloudConfig {
        CloudConfig {
            base_url: self.cloud.base_url.clone(),
            model: self.cloud.model.clone(),
            api_key: self.cloud.api_key.clone(),
            api_key_env: self.cloud.api_key_env.clone(),
            timeout_secs: self.cloud.timeout_secs,
            max_attempts: self.cloud.max_attempts.max(1),
        }
    }
}

fn parse_env<T: FromStr>(var: &str, value: &str) -> Result<T, StoreError> {
    value.parse().map_err(|_| StoreError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, StoreError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(StoreError::InvalidEnv {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
