//! Status and health commands.

use anyhow::Result;
use parley_store::Settings;

use crate::app;
use crate::output::{text_formatter, JsonFormatter};
use crate::{Cli, OutputFormat};

/// Runs the status command.
pub async fn run_status(cli: &Cli, settings: &Settings) -> Result<()> {
    let router = app::start_router(cli, settings).await?;
    let status = router.status().await;

    match cli.format {
        OutputFormat::Text => println!("{}", text_formatter(cli).format_status(&status)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&status)?),
    }
    Ok(())
}

/// Runs the health command.
pub async fn run_health(cli: &Cli, settings: &Settings) -> Result<()> {
    let router = app::start_router(cli, settings).await?;
    let report = router.health().await;

    match cli.format {
        OutputFormat::Text => println!("{}", text_formatter(cli).format_health(&report)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&report)?),
    }
    Ok(())
}
