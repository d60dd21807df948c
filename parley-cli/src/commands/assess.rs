//! Assessment commands: job fit and aptitude questions.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use parley_core::{AptitudeQuestion, CandidateContext, Difficulty, JobDescription};
use parley_store::Settings;
use std::path::{Path, PathBuf};

use crate::input::read_json;
use crate::output::{print_routed, text_formatter, JsonFormatter};
use crate::{app, Cli, OutputFormat};

/// Arguments for the job-fit command.
#[derive(Args)]
pub struct JobFitArgs {
    /// Candidate context (JSON).
    #[arg(long)]
    pub context: PathBuf,

    /// Job description (JSON).
    #[arg(long)]
    pub job: PathBuf,
}

/// Arguments for the aptitude command.
#[derive(Args)]
pub struct AptitudeArgs {
    #[command(subcommand)]
    pub action: AptitudeAction,
}

/// Aptitude subcommands.
#[derive(Subcommand)]
pub enum AptitudeAction {
    /// Generate multiple-choice questions.
    Generate {
        /// Difficulty: easy, medium or hard.
        #[arg(long, short, default_value = "medium")]
        difficulty: Difficulty,

        /// Number of questions (1-20).
        #[arg(long, short, default_value_t = 5)]
        count: usize,
    },

    /// Grade an answer against a generated question.
    Grade {
        /// Questions file (JSON, as written by `aptitude generate -f json`).
        #[arg(long)]
        questions: PathBuf,

        /// Question id (apt_1, apt_2, ...).
        #[arg(long)]
        id: String,

        /// The answer, verbatim option text.
        #[arg(long)]
        answer: String,
    },
}

/// Runs the job-fit command.
pub async fn run_job_fit(args: &JobFitArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let context: CandidateContext = read_json(&args.context).await?;
    let job: JobDescription = read_json(&args.job).await?;
    let router = app::start_router(cli, settings).await?;

    let routed = router.calculate_job_fit(&context, &job).await?;
    print_routed(cli, &routed, |f, fit| f.format_job_fit(fit))
}

/// Runs the aptitude command.
pub async fn run_aptitude(args: &AptitudeArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    match &args.action {
        AptitudeAction::Generate { difficulty, count } => {
            let router = app::start_router(cli, settings).await?;
            let routed = router
                .generate_aptitude_questions(*difficulty, *count)
                .await?;
            print_routed(cli, &routed, |f, questions| f.format_aptitude(questions))
        }
        AptitudeAction::Grade {
            questions,
            id,
            answer,
        } => grade(questions, id, answer, cli).await,
    }
}

async fn grade(path: &Path, id: &str, answer: &str, cli: &Cli) -> Result<()> {
    let questions = load_questions(path).await?;
    let question = questions
        .iter()
        .find(|q| q.id == id)
        .with_context(|| format!("No question with id '{id}' in {}", path.display()))?;

    // Grading is deterministic; no provider is needed.
    let result = question.grade(answer);

    match cli.format {
        OutputFormat::Text => println!("{}", text_formatter(cli).format_aptitude_result(&result)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&result)?),
    }
    Ok(())
}

/// Accepts a bare question array or the routed envelope from
/// `aptitude generate -f json`.
async fn load_questions(path: &Path) -> Result<Vec<AptitudeQuestion>> {
    let value: serde_json::Value = read_json(path).await?;
    let list = match value {
        serde_json::Value::Object(mut envelope) => envelope
            .remove("result")
            .with_context(|| format!("No question list in {}", path.display()))?,
        other => other,
    };
    serde_json::from_value(list).with_context(|| format!("Invalid questions in {}", path.display()))
}
