// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Parley CLI - interview intelligence routed across a local and a cloud model.
//!
//! # Examples
//!
//! ```bash
//! # Provider availability, preference and counters
//! parley status
//!
//! # Health with recommendations, as JSON
//! parley health --format json --pretty
//!
//! # Build a candidate context from a resume
//! parley context --resume resume.json --role "Backend Engineer" > ctx.json
//!
//! # Generate and score questions
//! parley question --context ctx.json --number 3 --history history.json
//! parley evaluate --context ctx.json --question "..." --answer "..."
//!
//! # Run a whole interview on the terminal, using the cloud model
//! parley --engine cloud interview --resume resume.json --role "Data Engineer"
//! ```

mod app;
mod commands;
mod input;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use parley_core::{ProviderError, ProviderId};
use parley_router::RouterError;
use parley_store::LogLevel;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{assess, config, interview, status};

// ============================================================================
// CLI Definition
// ============================================================================

/// Parley CLI - tiered local/cloud interview intelligence.
#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Interview intelligence routed across local and cloud models")]
#[command(long_about = r#"
Parley generates interview questions, scores answers and summarizes
interviews. Each operation runs on the preferred model, falls back to the
other one when it fails, and ends with deterministic defaults when neither
returns usable content.

Providers:
  • Local (Ollama)   OLLAMA_BASE_URL, OLLAMA_MODEL, OLLAMA_TIMEOUT
  • Cloud (Gemini)   GEMINI_API_KEY, GEMINI_MODEL

Examples:
  parley status                        # Availability and preference
  parley --engine cloud question ...   # Force the cloud model
  parley --no-fallback evaluate ...    # Never try the other model
  parley config init                   # Write default settings
"#)]
#[command(version)]
#[command(author = "Parley Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'status'.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file (default: ~/.config/parley/settings.json).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Force a provider as primary (local or cloud).
    #[arg(long, short = 'e', global = true)]
    pub engine: Option<ProviderId>,

    /// Never fall back to the other provider.
    #[arg(long, global = true)]
    pub no_fallback: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show provider availability, preference and usage counters.
    #[command(visible_alias = "s")]
    Status,

    /// Show overall health with recommendations.
    Health,

    /// Build a candidate context from a resume.
    Context(interview::ContextArgs),

    /// Generate an interview question.
    #[command(visible_alias = "q")]
    Question(interview::QuestionArgs),

    /// Score an answer.
    Evaluate(interview::EvaluateArgs),

    /// Summarize an interview from its evaluations.
    Report(interview::ReportArgs),

    /// Score a candidate against a job description.
    JobFit(assess::JobFitArgs),

    /// Generate or grade aptitude questions.
    Aptitude(assess::AptitudeArgs),

    /// Run an interview on the terminal.
    #[command(visible_alias = "i")]
    Interview(interview::InterviewArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No provider could serve the request.
    ProviderMissing = 2,
    /// Invalid input.
    InvalidInput = 3,
    /// Timeout.
    Timeout = 4,
}

impl ExitCode {
    /// Exit code for an error returned by a command.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<RouterError>() {
            Some(RouterError::InvalidInput(_)) => ExitCode::InvalidInput,
            Some(e) if matches!(
                e.rejection().and_then(|r| r.provider_error()),
                Some(ProviderError::Timeout(_))
            ) =>
            {
                ExitCode::Timeout
            }
            Some(_) => ExitCode::ProviderMissing,
            None => ExitCode::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("parley=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("parley={level}")))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = app::load_settings(&cli).await;
    let level = settings.as_ref().map_or(LogLevel::Warn, |s| s.log_level);
    setup_logging(cli.verbose, cli.quiet, level);

    let result = run(&cli, settings).await;

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }
    std::process::exit(ExitCode::Success as i32);
}

async fn run(cli: &Cli, settings: Result<parley_store::Settings>) -> Result<()> {
    // Config commands work without a loadable settings file.
    if let Some(Commands::Config(args)) = &cli.command {
        return config::run(args, cli, settings).await;
    }

    let settings = settings?;
    match &cli.command {
        Some(Commands::Status) | None => status::run_status(cli, &settings).await,
        Some(Commands::Health) => status::run_health(cli, &settings).await,
        Some(Commands::Context(args)) => interview::run_context(args, cli, &settings).await,
        Some(Commands::Question(args)) => interview::run_question(args, cli, &settings).await,
        Some(Commands::Evaluate(args)) => interview::run_evaluate(args, cli, &settings).await,
        Some(Commands::Report(args)) => interview::run_report(args, cli, &settings).await,
        Some(Commands::Interview(args)) => interview::run_interview(args, cli, &settings).await,
        Some(Commands::JobFit(args)) => assess::run_job_fit(args, cli, &settings).await,
        Some(Commands::Aptitude(args)) => assess::run_aptitude(args, cli, &settings).await,
        Some(Commands::Config(_)) => Ok(()),
    }
}
