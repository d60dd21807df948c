//! Provider configuration.

use std::time::Duration;

/// Default local endpoint.
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:11434";

/// Default local model.
pub const DEFAULT_LOCAL_MODEL: &str = "llama3.1:8b";

/// Default cloud endpoint.
pub const DEFAULT_CLOUD_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default cloud model.
pub const DEFAULT_CLOUD_MODEL: &str = "gemini-2.0-flash";

/// Default environment variable holding the cloud API key.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default per-call timeout for both providers.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default local probe timeout.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Configuration of the local provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    /// Base URL of the Ollama-compatible service.
    pub base_url: String,
    /// Preferred model.
    pub model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
    /// Probe timeout in seconds.
    pub probe_timeout_secs: u64,
    /// Attempts per call, including the first.
    pub max_attempts: u32,
}

impl LocalConfig {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Probe timeout.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for LocalConfig {
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

/// Configuration of the cloud provider.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudConfig {
    /// Base URL of the Gemini-compatible API.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// API key, if configured.
    pub api_key: Option<String>,
    /// Environment variable the key was read from.
    pub api_key_env: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
    /// Attempts per call, including the first.
    pub max_attempts: u32,
}

impl CloudConfig {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the API key if it is present and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CLOUD_BASE_URL.to_string(),
            model: DEFAULT_CLOUD_MODEL.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: 1,
        }
    }
}

// The key is never printed.
impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}
