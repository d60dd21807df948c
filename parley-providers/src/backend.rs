//! Completion backends.
//!
//! A [`Backend`] turns a prompt into model text. The operation logic shared
//! by both providers lives in [`LlmProvider`](crate::LlmProvider) and only
//! differs per backend through [`PromptStyle`].

use async_trait::async_trait;
use parley_core::{ProbeReport, ProviderError, ProviderId, ProviderInfo};

/// Sampling parameters for one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Nucleus sampling.
    pub top_p: f32,
    /// Top-k sampling.
    pub top_k: u32,
}

impl GenerationParams {
    /// Creates parameters with the shared `top_p = 0.8`, `top_k = 10`.
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            top_p: 0.8,
            top_k: 10,
        }
    }
}

/// How much conversation context a backend receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromptStyle {
    /// Only the last N history entries are included.
    pub history_window: Option<usize>,
    /// Answers in the history are cut to this many characters.
    pub answer_excerpt_chars: Option<usize>,
}

impl PromptStyle {
    /// Compact context for small local models.
    pub const COMPACT: Self = Self {
        history_window: Some(4),
        answer_excerpt_chars: Some(200),
    };

    /// Full context.
    pub const FULL: Self = Self {
        history_window: None,
        answer_excerpt_chars: None,
    };
}

/// A text-completion backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Provider identity.
    fn id(&self) -> ProviderId;

    /// Context budget for prompts.
    fn style(&self) -> PromptStyle;

    /// Configuration echo.
    async fn describe(&self) -> ProviderInfo;

    /// Availability check. Never fails.
    async fn probe(&self) -> ProbeReport;

    /// Generates text for a prompt.
    ///
    /// A blank reply is reported as [`ProviderError::Empty`].
    async fn complete(&self, prompt: &str, params: GenerationParams)
        -> Result<String, ProviderError>;
}
