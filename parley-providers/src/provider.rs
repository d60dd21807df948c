//! The operation set shared by every completion backend.

use async_trait::async_trait;
use parley_core::{
    defaults, AptitudeQuestion, CandidateContext, CapabilityProvider, Difficulty, Evaluation,
    HistoryEntry, InterviewReport, JobDescription, JobFit, ProbeReport, ProviderError, ProviderId,
    ProviderInfo, Question, QuestionType, ResumeData, ScoreSummary, SkillMatch,
};
use tracing::{debug, instrument};

use crate::backend::{Backend, GenerationParams, PromptStyle};
use crate::{extract, normalize, prompts};

/// A [`CapabilityProvider`] backed by a text-completion [`Backend`].
///
/// Each operation renders a prompt, asks the backend for text, extracts
/// the JSON and normalizes it into a complete record.
#[derive(Debug)]
pub struct LlmProvider<B> {
    backend: B,
}

impl<B: Backend> LlmProvider<B> {
    /// Wraps a backend.
    pub fn from_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn style(&self) -> PromptStyle {
        self.backend.style()
    }

    async fn complete_object(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<serde_json::Map<String, serde_json::Value>, ProviderError> {
        let text = self.backend.complete(prompt, params).await?;
        debug!(chars = text.len(), "Completion received");
        extract::object(&text)
    }
}

#[async_trait]
impl<B: Backend> CapabilityProvider for LlmProvider<B> {
    fn id(&self) -> ProviderId {
        self.backend.id()
    }

    async fn describe(&self) -> ProviderInfo {
        self.backend.describe().await
    }

    async fn probe(&self) -> ProbeReport {
        self.backend.probe().await
    }

    #[instrument(skip(self, resume), fields(provider = %self.backend.id()))]
    async fn extract_context(
        &self,
        resume: &ResumeData,
        role: &str,
        interview_type: &str,
    ) -> Result<CandidateContext, ProviderError> {
        let prompt = prompts::domain_analysis(resume, role);
        let map = self
            .complete_object(&prompt, GenerationParams::new(0.2, 500))
            .await?;
        let analysis = normalize::domain_analysis(&map, &resume.skills);
        Ok(CandidateContext::new(resume, role, interview_type, analysis))
    }

    #[instrument(skip(self, context), fields(provider = %self.backend.id()))]
    async fn generate_first_question(
        &self,
        context: &CandidateContext,
    ) -> Result<Question, ProviderError> {
        let prompt = prompts::first_question(context);
        let map = self
            .complete_object(&prompt, GenerationParams::new(0.3, 300))
            .await?;
        let mut question = normalize::question(&map, defaults::first_question(&context.role))?;
        // The opening question is always an easy introduction.
        question.question_type = QuestionType::Introductory;
        question.difficulty = Difficulty::Easy;
        Ok(question)
    }

    #[instrument(skip(self, context, history), fields(provider = %self.backend.id(), history = history.len()))]
    async fn generate_next_question(
        &self,
        context: &CandidateContext,
        history: &[HistoryEntry],
        question_number: u8,
    ) -> Result<Question, ProviderError> {
        let prompt = prompts::next_question(context, history, question_number, self.style());
        let map = self
            .complete_object(&prompt, GenerationParams::new(0.5, 400))
            .await?;
        normalize::question(&map, defaults::next_question(&context.role, question_number))
    }

    #[instrument(skip_all, fields(provider = %self.backend.id(), answer_chars = answer.len()))]
    async fn evaluate_answer(
        &self,
        question_text: &str,
        answer: &str,
        context: &CandidateContext,
        history: &[HistoryEntry],
    ) -> Result<Evaluation, ProviderError> {
        let prompt = prompts::evaluation(question_text, answer, context, history, self.style());
        let map = self
            .complete_object(&prompt, GenerationParams::new(0.1, 300))
            .await?;
        normalize::evaluation(&map, &context.role)
    }

    #[instrument(skip_all, fields(provider = %self.backend.id(), evaluations = evaluations.len()))]
    async fn generate_final_report(
        &self,
        context: &CandidateContext,
        history: &[HistoryEntry],
        evaluations: &[Evaluation],
    ) -> Result<InterviewReport, ProviderError> {
        let Some(scores) = ScoreSummary::from_evaluations(evaluations) else {
            return Ok(defaults::empty_report());
        };
        let prompt = prompts::report(context, history, &scores, self.style());
        let map = self
            .complete_object(&prompt, GenerationParams::new(0.3, 800))
            .await?;
        Ok(normalize::report(&map, &scores))
    }

    #[instrument(skip_all, fields(provider = %self.backend.id(), job = %job.title))]
    async fn calculate_job_fit(
        &self,
        context: &CandidateContext,
        job: &JobDescription,
    ) -> Result<JobFit, ProviderError> {
        let matched = SkillMatch::compute(&context.skills, context.experience_years, job);
        let prompt = prompts::job_fit(context, job, &matched);
        let map = self
            .complete_object(&prompt, GenerationParams::new(0.2, 600))
            .await?;
        Ok(normalize::job_fit(&map, &matched))
    }

    #[instrument(skip(self), fields(provider = %self.backend.id()))]
    async fn generate_aptitude_questions(
        &self,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<AptitudeQuestion>, ProviderError> {
        let prompt = prompts::aptitude(difficulty, count);
        let text = self
            .backend
            .complete(&prompt, GenerationParams::new(0.4, 2000))
            .await?;
        let items = extract::array(&text)?;
        normalize::aptitude(&items, difficulty, count)
    }
}
