//! Ollama wire types.

use serde::{Deserialize, Serialize};

use crate::backend::GenerationParams;

/// Body of `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    /// Model name.
    pub model: &'a str,
    /// Prompt text.
    pub prompt: &'a str,
    /// Always false: the whole reply is read at once.
    pub stream: bool,
    /// Sampling options.
    pub options: GenerateOptions,
}

/// Sampling options for `/api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateOptions {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub num_predict: u32,
    /// Nucleus sampling.
    pub top_p: f32,
    /// Top-k sampling.
    pub top_k: u32,
}

impl From<GenerationParams> for GenerateOptions {
    fn from(params: GenerationParams) -> Self {
        Self {
            temperature: params.temperature,
            num_predict: params.max_tokens,
            top_p: params.top_p,
            top_k: params.top_k,
        }
    }
}

/// Reply of `POST /api/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    /// Generated text.
    #[serde(default)]
    pub response: String,
}

/// Reply of `GET /api/tags`.
#[derive(Debug, Default, Deserialize)]
pub struct TagsResponse {
    /// Installed models.
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// One installed model.
#[derive(Debug, Deserialize)]
pub struct ModelTag {
    /// Model name, e.g. `llama3.1:8b`.
    pub name: String,
}

/// Picks the model to use from the installed list.
///
/// The configured model is kept when an installed name contains it, or
/// shares its family (the part before `:`). Otherwise the first installed
/// model is used. Returns `None` when nothing is installed.
pub fn select_model(configured: &str, installed: &[String]) -> Option<String> {
    let family = configured.split(':').next().unwrap_or(configured);
    let matches = installed
        .iter()
        .any(|name| name.contains(configured) || (!family.is_empty() && name.starts_with(family)));

    if matches {
        Some(configured.to_string())
    } else {
        installed.first().cloned()
    }
}
