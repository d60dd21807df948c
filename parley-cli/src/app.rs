//! Shared bootstrap: settings, providers and the router.

use anyhow::{bail, Context, Result};
use parley_providers::{CloudProvider, LocalProvider};
use parley_router::{Router, RouterConfig};
use parley_store::{default_settings_path, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::Cli;

/// Settings file selected by `--config`, or the default location.
pub fn settings_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(default_settings_path)
}

/// Loads settings (file, then environment) and applies command-line
/// overrides.
pub async fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = settings_path(cli);
    let mut settings = Settings::load(&path)
        .await
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;

    if cli.no_fallback {
        settings.routing.fallback_enabled = false;
    }
    Ok(settings)
}

/// Builds both providers, starts the router and applies `--engine`.
pub async fn start_router(cli: &Cli, settings: &Settings) -> Result<Router> {
    let local = LocalProvider::new(settings.local_config())
        .context("Failed to build the local provider")?;
    let cloud = CloudProvider::new(settings.cloud_config())
        .context("Failed to build the cloud provider")?;

    let config = RouterConfig {
        preference: settings.preference(),
        empty_results: settings.routing.empty_results,
    };
    let router = Router::start(Arc::new(local), Arc::new(cloud), config).await;

    if let Some(engine) = cli.engine {
        if !router.force(engine).await {
            bail!(
                "Cannot use {} as the primary provider: it is not available",
                engine.display_name()
            );
        }
        debug!(engine = %engine, "Engine forced from command line");
    }

    Ok(router)
}
