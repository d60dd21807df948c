//! Local provider (Ollama-compatible).
//!
//! ## API Endpoints
//!
//! - `GET /api/tags` - Installed models, used as the health probe
//! - `POST /api/generate` - Non-streaming completion
//!
//! The probe succeeds when the service answers and at least one model is
//! installed. If the configured model is missing, the first installed model
//! becomes the effective model for later calls.

mod api;

use async_trait::async_trait;
use parley_core::{ProbeReport, ProviderError, ProviderId, ProviderInfo};
use parley_fetch::{join_url, HttpClient, HttpError, Probe, RetryStrategy};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

pub use api::select_model;
use api::{GenerateRequest, GenerateResponse, TagsResponse};

use crate::backend::{Backend, GenerationParams, PromptStyle};
use crate::config::LocalConfig;
use crate::provider::LlmProvider;

/// The local provider.
pub type LocalProvider = LlmProvider<OllamaBackend>;

impl LlmProvider<OllamaBackend> {
    /// Creates a local provider.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the HTTP client cannot be built.
    pub fn new(config: LocalConfig) -> Result<Self, HttpError> {
        Ok(Self::from_backend(OllamaBackend::new(config)?))
    }
}

/// Completion backend talking to an Ollama-compatible service.
#[derive(Debug)]
pub struct OllamaBackend {
    config: LocalConfig,
    client: HttpClient,
    retry: RetryStrategy,
    effective_model: RwLock<String>,
}

impl OllamaBackend {
    /// Creates a backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the HTTP client cannot be built.
    pub fn new(config: LocalConfig) -> Result<Self, HttpError> {
        let client = HttpClient::with_timeout(config.timeout())?;
        let retry = RetryStrategy::new(config.max_attempts);
        let effective_model = RwLock::new(config.model.clone());
        Ok(Self {
            config,
            client,
            retry,
            effective_model,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LocalConfig {
        &self.config
    }

    /// Model currently used for completions.
    pub async fn effective_model(&self) -> String {
        self.effective_model.read().await.clone()
    }

    fn installed_models(body: Option<serde_json::Value>) -> Vec<String> {
        body.and_then(|value| serde_json::from_value::<TagsResponse>(value).ok())
            .unwrap_or_default()
            .models
            .into_iter()
            .map(|m| m.name)
            .collect()
    }
}

#[async_trait]
impl Backend for OllamaBackend {
    fn id(&self) -> ProviderId {
        ProviderId::Local
    }

    fn style(&self) -> PromptStyle {
        PromptStyle::COMPACT
    }

    async fn describe(&self) -> ProviderInfo {
        ProviderInfo {
            id: ProviderId::Local,
            endpoint: self.config.base_url.clone(),
            model: self.config.model.clone(),
            effective_model: self.effective_model().await,
            credential_required: false,
            credential_present: false,
            credential_env: None,
            timeout_secs: self.config.timeout_secs,
        }
    }

    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn probe(&self) -> ProbeReport {
        let url = match join_url(&self.config.base_url, "api/tags") {
            Ok(url) => url,
            Err(e) => return ProbeReport::unavailable(ProviderId::Local, e.to_string()),
        };

        let result = Probe::new(url.as_str())
            .with_timeout(self.config.probe_timeout())
            .check(&self.client)
            .await;

        if !result.success {
            let reason = result
                .error
                .unwrap_or_else(|| "service not reachable".to_string());
            debug!(%reason, "Local provider unavailable");
            return ProbeReport::unavailable(ProviderId::Local, reason);
        }

        let installed = Self::installed_models(result.body);
        let Some(model) = select_model(&self.config.model, &installed) else {
            warn!("Local service is running but has no models installed");
            return ProbeReport::unavailable(ProviderId::Local, "no models installed");
        };

        *self.effective_model.write().await = model.clone();

        if model == self.config.model {
            info!(%model, response_ms = result.response_time_ms, "Local provider available");
            ProbeReport::available(ProviderId::Local)
        } else {
            warn!(configured = %self.config.model, using = %model, "Configured model not installed");
            ProbeReport::available(ProviderId::Local)
                .with_effective_model(model.clone())
                .with_detail(format!(
                    "model {} not installed, using {model}",
                    self.config.model
                ))
        }
    }

    #[instrument(skip(self, prompt), fields(prompt_chars = prompt.len()))]
    async fn complete(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, ProviderError> {
        let url = join_url(&self.config.base_url, "api/generate")
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let model = self.effective_model().await;
        let body = GenerateRequest {
            model: &model,
            prompt,
            stream: false,
            options: params.into(),
        };

        debug!(%model, "Local completion request");
        let reply: GenerateResponse = self
            .retry
            .run(|| self.client.post_json_for(url.as_str(), &body))
            .await?;

        let text = reply.response.trim();
        if text.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(text.to_string())
    }
}
