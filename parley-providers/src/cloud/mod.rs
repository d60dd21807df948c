//! Cloud provider (Gemini-compatible).
//!
//! ## API Endpoints
//!
//! - `POST /v1beta/models/{model}:generateContent?key=KEY`
//!
//! Availability is a configuration check only: the provider is available
//! when a non-blank API key is configured. No network call is made.

mod api;

use async_trait::async_trait;
use parley_core::{ProbeReport, ProviderError, ProviderId, ProviderInfo};
use parley_fetch::{join_url, HttpClient, HttpError, RetryStrategy};
use tracing::{debug, instrument};
use url::Url;

use api::{GenerateContentRequest, GenerateContentResponse};

use crate::backend::{Backend, GenerationParams, PromptStyle};
use crate::config::CloudConfig;
use crate::provider::LlmProvider;

/// The cloud provider.
pub type CloudProvider = LlmProvider<GeminiBackend>;

impl LlmProvider<GeminiBackend> {
    /// Creates a cloud provider.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the HTTP client cannot be built.
    pub fn new(config: CloudConfig) -> Result<Self, HttpError> {
        Ok(Self::from_backend(GeminiBackend::new(config)?))
    }
}

/// Completion backend talking to a Gemini-compatible API.
#[derive(Debug)]
pub struct GeminiBackend {
    config: CloudConfig,
    client: HttpClient,
    retry: RetryStrategy,
}

impl GeminiBackend {
    /// Creates a backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the HTTP client cannot be built.
    pub fn new(config: CloudConfig) -> Result<Self, HttpError> {
        let client = HttpClient::with_timeout(config.timeout())?;
        let retry = RetryStrategy::new(config.max_attempts);
        Ok(Self {
            config,
            client,
            retry,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    fn endpoint(&self, key: &str) -> Result<Url, HttpError> {
        let path = format!("v1beta/models/{}:generateContent", self.config.model);
        let mut url = join_url(&self.config.base_url, &path)?;
        url.query_pairs_mut().append_pair("key", key);
        Ok(url)
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    fn id(&self) -> ProviderId {
        ProviderId::Cloud
    }

    fn style(&self) -> PromptStyle {
        PromptStyle::FULL
    }

    async fn describe(&self) -> ProviderInfo {
        ProviderInfo {
            id: ProviderId::Cloud,
            endpoint: self.config.base_url.clone(),
            model: self.config.model.clone(),
            effective_model: self.config.model.clone(),
            credential_required: true,
            credential_present: self.config.credential().is_some(),
            credential_env: Some(self.config.api_key_env.clone()),
            timeout_secs: self.config.timeout_secs,
        }
    }

    async fn probe(&self) -> ProbeReport {
        if self.config.credential().is_some() {
            ProbeReport::available(ProviderId::Cloud)
        } else {
            debug!(env = %self.config.api_key_env, "Cloud provider has no API key");
            ProbeReport::unavailable(
                ProviderId::Cloud,
                format!("{} is not set", self.config.api_key_env),
            )
        }
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_chars = prompt.len()))]
    async fn complete(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, ProviderError> {
        let key = self.config.credential().ok_or_else(|| {
            ProviderError::Unavailable(format!("{} is not set", self.config.api_key_env))
        })?;
        let url = self
            .endpoint(key)
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let body = GenerateContentRequest::new(prompt, params);

        debug!("Cloud completion request");
        let reply: GenerateContentResponse = self
            .retry
            .run(|| self.client.post_json_for(url.as_str(), &body))
            .await?;

        let text = reply
            .first_text()
            .ok_or_else(|| ProviderError::Malformed("reply has no candidate text".to_string()))?
            .trim();
        if text.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_carries_key() {
        let backend = GeminiBackend::new(CloudConfig {
            base_url: "https://example.com/".into(),
            api_key: Some("k1".into()),
            ..CloudConfig::default()
        })
        .unwrap();
        let url = backend.endpoint("k1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/v1beta/models/gemini-2.0-flash:generateContent?key=k1"
        );
    }
}
