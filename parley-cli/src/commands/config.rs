//! Config command - manage configuration.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use parley_store::{default_config_dir, Settings};

use crate::app;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default settings file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration (file plus environment).
    Show,

    /// Show configuration paths.
    Path,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, settings: Result<Settings>) -> Result<()> {
    match &args.action {
        ConfigAction::Init { force } => init_config(*force, cli).await,
        ConfigAction::Show => show_config(cli, &settings?),
        ConfigAction::Path => show_paths(cli),
    }
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = app::settings_path(cli);
    Settings::init(&path, force)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    match cli.format {
        OutputFormat::Text => println!("Wrote default settings to {}", path.display()),
        OutputFormat::Json => {
            let output = serde_json::json!({ "settings_file": path.display().to_string() });
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}

fn show_config(cli: &Cli, settings: &Settings) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let cloud_key = if settings.cloud.api_key.is_some() {
                "set"
            } else {
                "not set"
            };

            println!("Parley Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Routing:");
            println!("  Primary:       {}", settings.routing.primary.display_name());
            println!("  Fallback:      {}", settings.routing.fallback_enabled);
            println!("  Empty results: {:?}", settings.routing.empty_results);
            println!();
            println!("Local:");
            println!("  Endpoint:      {}", settings.local.base_url);
            println!("  Model:         {}", settings.local.model);
            println!("  Timeout:       {}s", settings.local.timeout_secs);
            println!("  Attempts:      {}", settings.local.max_attempts);
            println!();
            println!("Cloud:");
            println!("  Endpoint:      {}", settings.cloud.base_url);
            println!("  Model:         {}", settings.cloud.model);
            println!("  Timeout:       {}s", settings.cloud.timeout_secs);
            println!("  Attempts:      {}", settings.cloud.max_attempts);
            println!("  {}: {}", settings.cloud.api_key_env, cloud_key);
            println!();
            println!("Log level: {}", settings.log_level);
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(settings)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = app::settings_path(cli);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }

    Ok(())
}
