//! Interview commands: context, question, evaluate, report and the
//! interactive session.

use anyhow::Result;
use clap::Args;
use parley_core::{
    CandidateContext, Evaluation, HistoryEntry, InterviewReport, Question, ResumeData, Tier,
};
use parley_router::Router;
use parley_store::Settings;
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::input::{read_json, read_optional};
use crate::output::{print_routed, text_formatter, JsonFormatter};
use crate::{app, Cli, OutputFormat};

// ============================================================================
// Arguments
// ============================================================================

/// Arguments for the context command.
#[derive(Args)]
pub struct ContextArgs {
    /// Parsed resume (JSON).
    #[arg(long)]
    pub resume: PathBuf,

    /// Role being interviewed for.
    #[arg(long)]
    pub role: String,

    /// Interview type.
    #[arg(long = "type", default_value = "technical")]
    pub interview_type: String,
}

/// Arguments for the question command.
#[derive(Args)]
pub struct QuestionArgs {
    /// Candidate context (JSON, as written by `parley context`).
    #[arg(long)]
    pub context: PathBuf,

    /// Question number; 1 is the introductory question.
    #[arg(long, short = 'n', default_value_t = 1)]
    pub number: u8,

    /// Conversation so far (JSON array of history entries).
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for the evaluate command.
#[derive(Args)]
pub struct EvaluateArgs {
    /// Candidate context (JSON).
    #[arg(long)]
    pub context: PathBuf,

    /// Question text.
    #[arg(long)]
    pub question: String,

    /// Candidate answer.
    #[arg(long)]
    pub answer: String,

    /// Conversation so far (JSON array of history entries).
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Candidate context (JSON).
    #[arg(long)]
    pub context: PathBuf,

    /// Evaluations (JSON array).
    #[arg(long)]
    pub evaluations: PathBuf,

    /// Conversation (JSON array of history entries).
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for the interview command.
#[derive(Args)]
pub struct InterviewArgs {
    /// Parsed resume (JSON).
    #[arg(long)]
    pub resume: PathBuf,

    /// Role being interviewed for.
    #[arg(long)]
    pub role: String,

    /// Interview type.
    #[arg(long = "type", default_value = "technical")]
    pub interview_type: String,

    /// Number of questions to ask.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub questions: u8,
}

// ============================================================================
// One-shot commands
// ============================================================================

/// Runs the context command.
pub async fn run_context(args: &ContextArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let resume: ResumeData = read_json(&args.resume).await?;
    let router = app::start_router(cli, settings).await?;

    let routed = router
        .extract_context(&resume, &args.role, &args.interview_type)
        .await?;
    print_routed(cli, &routed, |f, context| f.format_context(context))
}

/// Runs the question command.
pub async fn run_question(args: &QuestionArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let context: CandidateContext = read_json(&args.context).await?;
    let history: Vec<HistoryEntry> = read_optional(args.history.as_deref()).await?;
    let router = app::start_router(cli, settings).await?;

    let routed = if args.number <= 1 {
        router.generate_first_question(&context).await?
    } else {
        router
            .generate_next_question(&context, &history, args.number)
            .await?
    };
    print_routed(cli, &routed, |f, question| f.format_question(question))
}

/// Runs the evaluate command.
pub async fn run_evaluate(args: &EvaluateArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let context: CandidateContext = read_json(&args.context).await?;
    let history: Vec<HistoryEntry> = read_optional(args.history.as_deref()).await?;
    let router = app::start_router(cli, settings).await?;

    let routed = router
        .evaluate_answer(&args.question, &args.answer, &context, &history)
        .await?;
    print_routed(cli, &routed, |f, evaluation| f.format_evaluation(evaluation))
}

/// Runs the report command.
pub async fn run_report(args: &ReportArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let context: CandidateContext = read_json(&args.context).await?;
    let evaluations: Vec<Evaluation> = read_json(&args.evaluations).await?;
    let history: Vec<HistoryEntry> = read_optional(args.history.as_deref()).await?;
    let router = app::start_router(cli, settings).await?;

    let routed = router
        .generate_final_report(&context, &history, &evaluations)
        .await?;
    print_routed(cli, &routed, |f, report| f.format_report(report))
}

// ============================================================================
// Interactive session
// ============================================================================

/// One asked question with its answer and score.
#[derive(Debug, Serialize)]
struct Turn {
    question: Question,
    question_served_by: Tier,
    answer: String,
    evaluation: Evaluation,
    evaluation_served_by: Tier,
}

/// Full session record, printed as JSON at the end.
#[derive(Debug, Serialize)]
struct Transcript {
    context: CandidateContext,
    turns: Vec<Turn>,
    history: Vec<HistoryEntry>,
    report: InterviewReport,
    report_served_by: Tier,
}

/// Runs an interview on the terminal. Answers are read one line at a time
/// from stdin; end of input finishes the interview early.
pub async fn run_interview(args: &InterviewArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let resume: ResumeData = read_json(&args.resume).await?;
    let router = app::start_router(cli, settings).await?;
    let session = Session::new(cli);

    let context = router
        .extract_context(&resume, &args.role, &args.interview_type)
        .await?
        .into_value();
    session.say(&session.formatter.format_context(&context));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut history = Vec::new();
    let mut turns = Vec::new();

    for number in 1..=args.questions {
        let question = ask(&router, &context, &history, number).await?;
        session.say("");
        session.say(&session.formatter.format_question(&question.value));
        session.prompt();

        let Some(answer) = lines.next_line().await? else {
            info!(asked = number - 1, "Input closed, ending interview");
            break;
        };

        history.push(HistoryEntry::question(number, question.value.text.clone()));
        history.push(HistoryEntry::answer(number, answer.clone()));

        let evaluation = router
            .evaluate_answer(&question.value.text, &answer, &context, &history)
            .await?;
        session.say(&session.formatter.format_evaluation(&evaluation.value));

        turns.push(Turn {
            question_served_by: question.served_by,
            question: question.value,
            answer,
            evaluation_served_by: evaluation.served_by,
            evaluation: evaluation.value,
        });
    }

    let evaluations: Vec<Evaluation> = turns.iter().map(|t| t.evaluation.clone()).collect();
    let report = router
        .generate_final_report(&context, &history, &evaluations)
        .await?;

    match cli.format {
        OutputFormat::Text => {
            println!();
            println!("{}", session.formatter.format_report(&report.value));
            println!();
            println!("{}", session.formatter.format_served_by(&report));
        }
        OutputFormat::Json => {
            let transcript = Transcript {
                context,
                turns,
                history,
                report_served_by: report.served_by,
                report: report.value,
            };
            println!("{}", JsonFormatter::new(cli.pretty).format(&transcript)?);
        }
    }
    Ok(())
}

async fn ask(
    router: &Router,
    context: &CandidateContext,
    history: &[HistoryEntry],
    number: u8,
) -> Result<parley_router::Routed<Question>> {
    let routed = if number == 1 {
        router.generate_first_question(context).await?
    } else {
        router.generate_next_question(context, history, number).await?
    };
    Ok(routed)
}

/// Where interactive text goes: stdout for text output, stderr when
/// stdout is reserved for the JSON transcript.
struct Session {
    formatter: crate::output::TextFormatter,
    to_stderr: bool,
}

impl Session {
    fn new(cli: &Cli) -> Self {
        Self {
            formatter: text_formatter(cli),
            to_stderr: cli.format == OutputFormat::Json,
        }
    }

    fn say(&self, text: &str) {
        if self.to_stderr {
            eprintln!("{text}");
        } else {
            println!("{text}");
        }
    }

    fn prompt(&self) {
        use std::io::Write;

        if self.to_stderr {
            eprint!("> ");
            let _ = std::io::stderr().flush();
        } else {
            print!("> ");
            let _ = std::io::stdout().flush();
        }
    }
}
