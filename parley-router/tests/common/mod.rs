//! Scripted in-memory providers for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parley_core::{
    defaults, AptitudeQuestion, CandidateContext, CapabilityProvider, Difficulty, Evaluation,
    HistoryEntry, InterviewReport, JobDescription, JobFit, ProbeReport, ProviderError, ProviderId,
    ProviderInfo, Question, ResumeData, ScoreSummary, SkillMatch,
};
use parley_router::{Router, RouterConfig};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// How a scripted provider answers every operation.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A complete record tagged with the provider id.
    Good,
    /// A successful but content-empty record.
    Empty,
    /// An evaluation with all-zero scores but notes.
    ZeroScores,
    /// A failure.
    Error(ProviderError),
}

/// A provider whose availability and replies are set by the test.
#[derive(Debug)]
pub struct ScriptedProvider {
    id: ProviderId,
    available: AtomicBool,
    reply: Mutex<Reply>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(id: ProviderId, available: bool, reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            id,
            available: AtomicBool::new(available),
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    /// Operation calls received (probes excluded).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer<T>(&self, good: T, empty: T) -> Result<T, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply.lock().unwrap().clone() {
            Reply::Good | Reply::ZeroScores => Ok(good),
            Reply::Empty => Ok(empty),
            Reply::Error(e) => Err(e),
        }
    }

    fn tag(&self) -> &'static str {
        self.id.cli_name()
    }
}

#[async_trait]
impl CapabilityProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn describe(&self) -> ProviderInfo {
        ProviderInfo {
            id: self.id,
            endpoint: format!("mem://{}", self.tag()),
            model: "scripted".into(),
            effective_model: "scripted".into(),
            credential_required: self.id == ProviderId::Cloud,
            credential_present: self.available.load(Ordering::SeqCst),
            credential_env: (self.id == ProviderId::Cloud).then(|| "GEMINI_API_KEY".to_string()),
            timeout_secs: 30,
        }
    }

    async fn probe(&self) -> ProbeReport {
        if self.available.load(Ordering::SeqCst) {
            ProbeReport::available(self.id)
        } else {
            ProbeReport::unavailable(self.id, "scripted outage")
        }
    }

    async fn extract_context(
        &self,
        resume: &ResumeData,
        role: &str,
        interview_type: &str,
    ) -> Result<CandidateContext, ProviderError> {
        let mut good = defaults::context(resume, role, interview_type);
        good.domain_analysis.primary_domain = format!("{}-domain", self.tag());
        let mut empty = good.clone();
        empty.domain_analysis.primary_domain = String::new();
        self.answer(good, empty)
    }

    async fn generate_first_question(
        &self,
        context: &CandidateContext,
    ) -> Result<Question, ProviderError> {
        let mut good = defaults::first_question(&context.role);
        good.text = format!("{} opening question", self.tag());
        let mut empty = good.clone();
        empty.text = String::new();
        self.answer(good, empty)
    }

    async fn generate_next_question(
        &self,
        context: &CandidateContext,
        _history: &[HistoryEntry],
        question_number: u8,
    ) -> Result<Question, ProviderError> {
        let mut good = defaults::next_question(&context.role, question_number);
        good.text = format!("{} question {question_number}", self.tag());
        let mut empty = good.clone();
        empty.text = "  ".into();
        self.answer(good, empty)
    }

    async fn evaluate_answer(
        &self,
        _question_text: &str,
        _answer: &str,
        _context: &CandidateContext,
        _history: &[HistoryEntry],
    ) -> Result<Evaluation, ProviderError> {
        let zero = matches!(*self.reply.lock().unwrap(), Reply::ZeroScores);
        let good = if zero {
            Evaluation::uniform(0, format!("{} found no substance", self.tag()))
        } else {
            Evaluation::uniform(75, format!("{} evaluation", self.tag()))
        };
        self.answer(good, Evaluation::uniform(0, ""))
    }

    async fn generate_final_report(
        &self,
        _context: &CandidateContext,
        _history: &[HistoryEntry],
        evaluations: &[Evaluation],
    ) -> Result<InterviewReport, ProviderError> {
        let mut good = ScoreSummary::from_evaluations(evaluations)
            .map_or_else(defaults::empty_report, |s| defaults::report(&s));
        good.overall_summary = format!("{} report", self.tag());
        let mut empty = good.clone();
        empty.overall_summary = String::new();
        self.answer(good, empty)
    }

    async fn calculate_job_fit(
        &self,
        context: &CandidateContext,
        job: &JobDescription,
    ) -> Result<JobFit, ProviderError> {
        let mut good = defaults::job_fit(&SkillMatch::compute(
            &context.skills,
            context.experience_years,
            job,
        ));
        good.role_suitability = format!("{} verdict", self.tag());
        let mut empty = good.clone();
        empty.role_suitability = String::new();
        self.answer(good, empty)
    }

    async fn generate_aptitude_questions(
        &self,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<AptitudeQuestion>, ProviderError> {
        let good: Vec<AptitudeQuestion> = (1..=count)
            .map(|i| {
                let mut q = defaults::aptitude_questions(difficulty).remove(0);
                q.id = format!("apt_{i}");
                q.question = format!("{} puzzle {i}", self.tag());
                q
            })
            .collect();
        self.answer(good, Vec::new())
    }
}

/// A started router over two scripted providers.
pub struct Harness {
    pub router: Arc<Router>,
    pub local: Arc<ScriptedProvider>,
    pub cloud: Arc<ScriptedProvider>,
}

impl Harness {
    pub async fn new(local: Arc<ScriptedProvider>, cloud: Arc<ScriptedProvider>) -> Self {
        Self::with_config(local, cloud, RouterConfig::default()).await
    }

    pub async fn with_config(
        local: Arc<ScriptedProvider>,
        cloud: Arc<ScriptedProvider>,
        config: RouterConfig,
    ) -> Self {
        let router = Router::start(local.clone(), cloud.clone(), config).await;
        Self {
            router: Arc::new(router),
            local,
            cloud,
        }
    }

    /// Local available and good, cloud available and good.
    pub async fn both_up() -> Self {
        Self::new(
            ScriptedProvider::new(ProviderId::Local, true, Reply::Good),
            ScriptedProvider::new(ProviderId::Cloud, true, Reply::Good),
        )
        .await
    }
}

pub fn context() -> CandidateContext {
    let resume = ResumeData {
        skills: vec!["Rust".into(), "Kafka".into(), "Postgres".into()],
        experience_years: 6.0,
        ..ResumeData::default()
    };
    defaults::context(&resume, "Backend Engineer", "technical")
}

pub fn transport() -> ProviderError {
    ProviderError::Transport("connection refused".into())
}

pub fn malformed() -> ProviderError {
    ProviderError::Malformed("no JSON object in reply".into())
}
