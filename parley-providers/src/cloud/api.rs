//! Gemini wire types.

use serde::{Deserialize, Serialize};

use crate::backend::GenerationParams;

/// Body of `POST /v1beta/models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    /// Conversation turns; always a single user turn.
    pub contents: Vec<Content<'a>>,
    /// Sampling configuration.
    pub generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single-turn request for a prompt.
    pub fn new(prompt: &'a str, params: GenerationParams) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: params.into(),
        }
    }
}

/// One conversation turn.
#[derive(Debug, Serialize)]
pub struct Content<'a> {
    /// Turn parts.
    pub parts: Vec<Part<'a>>,
}

/// One text part.
#[derive(Debug, Serialize)]
pub struct Part<'a> {
    /// Text.
    pub text: &'a str,
}

/// Sampling configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
    /// Nucleus sampling.
    pub top_p: f32,
    /// Top-k sampling.
    pub top_k: u32,
}

impl From<GenerationParams> for GenerationConfig {
    fn from(params: GenerationParams) -> Self {
        Self {
            temperature: params.temperature,
            max_output_tokens: params.max_tokens,
            top_p: params.top_p,
            top_k: params.top_k,
        }
    }
}

/// Reply of `generateContent`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate completions.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// One candidate completion.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    /// Generated content; absent when the candidate was blocked.
    #[serde(default)]
    pub content: Option<ReplyContent>,
}

/// Generated content.
#[derive(Debug, Deserialize)]
pub struct ReplyContent {
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<ReplyPart>,
}

/// One generated part.
#[derive(Debug, Deserialize)]
pub struct ReplyPart {
    /// Text, if this is a text part.
    #[serde(default)]
    pub text: Option<String>,
}
