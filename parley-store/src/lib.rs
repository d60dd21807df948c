// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Parley Store
//!
//! Settings for Parley.
//!
//! This crate provides:
//!
//! - **Settings**: routing preference, provider endpoints and timeouts,
//!   layered from defaults, a JSON file and the environment
//! - **Persistence**: owner-only, atomic JSON file I/O
//!
//! ## Usage
//!
//! ```ignore
//! use parley_store::{Settings, default_settings_path};
//!
//! let settings = Settings::load(&default_settings_path()).await?;
//! let local = LocalProvider::new(settings.local_config())?;
//! ```

pub mod error;
pub mod persistence;
pub mod settings;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_settings_path, load_json, load_json_or_default, save_json,
};
pub use settings::{CloudSettings, LocalSettings, LogLevel, RoutingSettings, Settings};
