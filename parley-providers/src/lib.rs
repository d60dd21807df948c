// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Parley Providers
//!
//! The two [`CapabilityProvider`](parley_core::CapabilityProvider)
//! implementations Parley routes between.
//!
//! | Provider | Backend | Availability check | Context budget |
//! |----------|---------|--------------------|----------------|
//! | [`LocalProvider`] | Ollama `/api/generate` | `GET /api/tags` lists a model | last 4 history entries |
//! | [`CloudProvider`] | Gemini `generateContent` | API key configured | full history |
//!
//! Both share one operation pipeline ([`LlmProvider`]): render a prompt,
//! complete it, extract the JSON ([`extract`]) and fill gaps with
//! deterministic defaults ([`normalize`]).
//!
//! ## Usage
//!
//! ```ignore
//! use parley_providers::{LocalConfig, LocalProvider};
//! use parley_core::CapabilityProvider;
//!
//! let local = LocalProvider::new(LocalConfig::default())?;
//! let report = local.probe().await;
//! ```

pub mod backend;
pub mod cloud;
pub mod config;
pub mod extract;
pub mod local;
pub mod normalize;
pub mod prompts;
pub mod provider;

pub use backend::{Backend, GenerationParams, PromptStyle};
pub use cloud::{CloudProvider, GeminiBackend};
pub use config::{CloudConfig, LocalConfig};
pub use local::{LocalProvider, OllamaBackend};
pub use provider::LlmProvider;
