//! The tiered router.
//!
//! Every provider-backed operation follows the same path:
//!
//! 1. Pre-check: inputs the deterministic tier answers directly never reach
//!    a provider and are not counted.
//! 2. Select: the preferred provider if available, otherwise the other one
//!    when fallback is enabled, otherwise the preferred one anyway.
//! 3. Execute: call the selected provider; if its result is rejected and a
//!    fallback path exists, call the other provider once.
//! 4. Recover: if the providers only produced unusable content, serve the
//!    deterministic default.

use parley_core::{
    defaults, AptitudeQuestion, AptitudeResult, CandidateContext, CapabilityProvider, Difficulty,
    EmptyResultPolicy, Evaluation, HealthReport, HistoryEntry, InterviewReport, JobDescription,
    JobFit, Payload, Preference, ProbeReport, ProviderError, ProviderHealth, ProviderId, Question,
    ResumeData, RouterStatus, ScoreSummary, SkillMatch,
};
use std::future::Future;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::deterministic;
use crate::dispatch::{Attempt, Call, Outcome, Routed};
use crate::error::{Rejection, RouterError};
use crate::health::HealthMonitor;
use crate::operation::Operation;
use crate::preference::PreferenceStore;
use crate::stats::UsageStats;

/// Valid follow-up question numbers.
pub const NEXT_QUESTION_RANGE: RangeInclusive<u8> = 2..=8;

/// Valid aptitude question counts.
pub const APTITUDE_COUNT_RANGE: RangeInclusive<usize> = 1..=20;

// ============================================================================
// Configuration
// ============================================================================

/// Startup configuration of a router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Startup preference, restored by [`Router::reset`].
    pub preference: Preference,
    /// Whether empty provider output counts as a failure.
    pub empty_results: EmptyResultPolicy,
}

// ============================================================================
// Selection
// ============================================================================

/// The provider chosen for an operation.
pub struct Selection {
    /// Selected provider.
    pub provider: Arc<dyn CapabilityProvider>,
    /// Its identity.
    pub id: ProviderId,
    /// True if the preferred provider was unavailable and this is the other one.
    pub fell_back: bool,
    /// True if the other provider may be tried when this one fails.
    pub fallback_allowed: bool,
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("id", &self.id)
            .field("fell_back", &self.fell_back)
            .field("fallback_allowed", &self.fallback_allowed)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Routes interview operations between a local and a cloud provider.
///
/// Construct once and share with `Arc`; all state is internally
/// synchronized.
pub struct Router {
    local: Arc<dyn CapabilityProvider>,
    cloud: Arc<dyn CapabilityProvider>,
    preference: PreferenceStore,
    stats: UsageStats,
    health: HealthMonitor,
    empty_results: EmptyResultPolicy,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("preference", &self.preference)
            .field("empty_results", &self.empty_results)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Creates a router without probing. Both providers count as
    /// unavailable until [`refresh_health`](Self::refresh_health) runs.
    pub fn new(
        local: Arc<dyn CapabilityProvider>,
        cloud: Arc<dyn CapabilityProvider>,
        config: RouterConfig,
    ) -> Self {
        Self {
            local,
            cloud,
            preference: PreferenceStore::new(config.preference),
            stats: UsageStats::new(),
            health: HealthMonitor::new(),
            empty_results: config.empty_results,
        }
    }

    /// Creates a router and probes both providers.
    pub async fn start(
        local: Arc<dyn CapabilityProvider>,
        cloud: Arc<dyn CapabilityProvider>,
        config: RouterConfig,
    ) -> Self {
        let router = Self::new(local, cloud, config);
        router.refresh_health().await;
        info!(
            primary = %config.preference.primary,
            fallback = config.preference.fallback_enabled,
            local = router.health.is_available(ProviderId::Local).await,
            cloud = router.health.is_available(ProviderId::Cloud).await,
            "Router started"
        );
        router
    }

    /// Returns the provider for an id.
    pub fn provider(&self, id: ProviderId) -> &Arc<dyn CapabilityProvider> {
        match id {
            ProviderId::Local => &self.local,
            ProviderId::Cloud => &self.cloud,
        }
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Re-probes both providers.
    pub async fn refresh_health(&self) -> Vec<ProbeReport> {
        let (local, cloud) = tokio::join!(
            self.health.probe(self.local.as_ref()),
            self.health.probe(self.cloud.as_ref()),
        );
        vec![local, cloud]
    }

    // ========================================================================
    // Selection & Execution
    // ========================================================================

    /// Chooses the provider for an operation and counts the dispatch.
    #[instrument(skip_all, fields(operation = %operation))]
    pub async fn select(&self, operation: Operation) -> Selection {
        let preference = self.preference.get().await;
        let primary = preference.primary;

        if self.health.is_available(primary).await {
            self.stats.record_request(primary).await;
            return self.selection(primary, false, preference.fallback_enabled);
        }

        if preference.fallback_enabled {
            let other = primary.other();
            warn!(preferred = %primary, using = %other, "Preferred provider unavailable, falling back");
            self.stats.record_fallback(other).await;
            return self.selection(other, true, false);
        }

        debug!(provider = %primary, "Preferred provider unavailable and fallback disabled");
        self.stats.record_request(primary).await;
        self.selection(primary, false, false)
    }

    fn selection(&self, id: ProviderId, fell_back: bool, fallback_allowed: bool) -> Selection {
        Selection {
            provider: Arc::clone(self.provider(id)),
            id,
            fell_back,
            fallback_allowed,
        }
    }

    /// Runs `primary`, and `fallback` if the primary result is rejected and
    /// fallback is enabled.
    ///
    /// The primary dispatch is counted by [`select`](Self::select); this
    /// counts the fallback dispatch.
    ///
    /// # Errors
    ///
    /// [`RouterError::Rejected`] if the primary was rejected and no fallback
    /// ran, [`RouterError::Terminal`] if the fallback was rejected too.
    pub async fn execute<T>(
        &self,
        operation: Operation,
        primary: Call<'_, T>,
        fallback: Option<Call<'_, T>>,
    ) -> Result<Routed<T>, RouterError>
    where
        T: Payload + Send,
    {
        self.execute_outcome(operation, primary, fallback)
            .await
            .into_routed()
    }

    /// Like [`execute`](Self::execute), keeping the attempt log on failure.
    #[instrument(skip_all, fields(operation = %operation, primary = %primary.provider()))]
    pub async fn execute_outcome<T>(
        &self,
        operation: Operation,
        primary: Call<'_, T>,
        fallback: Option<Call<'_, T>>,
    ) -> Outcome<T>
    where
        T: Payload + Send,
    {
        let mut attempts = Vec::with_capacity(2);

        let primary_id = primary.provider();
        let rejection = match self.attempt(primary, &mut attempts).await {
            Ok(value) => {
                return Outcome {
                    result: Ok((value, primary_id)),
                    attempts,
                };
            }
            Err(rejection) => rejection,
        };

        let fallback_enabled = fallback.is_some() && self.preference.get().await.fallback_enabled;
        let fallback = match fallback {
            Some(call) if fallback_enabled => call,
            _ => {
                return Outcome {
                    result: Err(RouterError::Rejected {
                        operation,
                        provider: primary_id,
                        rejection,
                    }),
                    attempts,
                };
            }
        };

        let fallback_id = fallback.provider();
        info!(from = %primary_id, to = %fallback_id, "Falling back after rejected result");
        self.stats.record_fallback(fallback_id).await;

        let result = match self.attempt(fallback, &mut attempts).await {
            Ok(value) => Ok((value, fallback_id)),
            Err(rejection) => Err(RouterError::Terminal {
                operation,
                provider: fallback_id,
                rejection,
            }),
        };
        Outcome { result, attempts }
    }

    async fn attempt<T: Payload + Send>(
        &self,
        call: Call<'_, T>,
        attempts: &mut Vec<Attempt>,
    ) -> Result<T, Rejection> {
        let provider = call.provider();
        let started = Instant::now();

        let judged = match call.run().await {
            Ok(value) if self.empty_results.rejects(value.is_empty_payload()) => {
                Err(Rejection::EmptyResult)
            }
            Ok(value) => Ok(value),
            Err(e) => Err(Rejection::Failed(e)),
        };

        match &judged {
            Ok(_) => {
                debug!(provider = %provider, elapsed = ?started.elapsed(), "Result accepted");
                attempts.push(Attempt::accepted(provider, started.elapsed()));
            }
            Err(rejection) => {
                warn!(provider = %provider, rejection = %rejection, "Result rejected");
                attempts.push(Attempt::rejected(provider, rejection.clone(), started.elapsed()));
            }
        }
        judged
    }

    /// Selects, executes with fallback, and recovers with `default`.
    async fn route<'a, T, F, Fut, D>(
        &self,
        operation: Operation,
        call: F,
        default: D,
    ) -> Result<Routed<T>, RouterError>
    where
        T: Payload + Send + 'a,
        F: Fn(Arc<dyn CapabilityProvider>) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>> + Send + 'a,
        D: FnOnce() -> T,
    {
        let selection = self.select(operation).await;

        let primary = Call::new(selection.id, call(Arc::clone(&selection.provider)));
        let fallback = selection.fallback_allowed.then(|| {
            let other = selection.id.other();
            Call::new(other, call(Arc::clone(self.provider(other))))
        });

        let outcome = self.execute_outcome(operation, primary, fallback).await;
        deterministic::recover(operation, outcome, default)
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Builds the candidate context.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when every provider failed without content.
    #[instrument(skip_all, fields(role = %role, interview_type = %interview_type))]
    pub async fn extract_context(
        &self,
        resume: &ResumeData,
        role: &str,
        interview_type: &str,
    ) -> Result<Routed<CandidateContext>, RouterError> {
        self.route(
            Operation::ExtractContext,
            move |p: Arc<dyn CapabilityProvider>| async move {
                p.extract_context(resume, role, interview_type).await
            },
            || defaults::context(resume, role, interview_type),
        )
        .await
    }

    /// Generates the introductory question.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when every provider failed without content.
    #[instrument(skip_all, fields(role = %context.role))]
    pub async fn generate_first_question(
        &self,
        context: &CandidateContext,
    ) -> Result<Routed<Question>, RouterError> {
        self.route(
            Operation::FirstQuestion,
            move |p: Arc<dyn CapabilityProvider>| async move {
                p.generate_first_question(context).await
            },
            || defaults::first_question(&context.role),
        )
        .await
    }

    /// Generates follow-up question `question_number` (2 through 8).
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidInput`] for an out-of-range number, otherwise
    /// [`RouterError`] when every provider failed without content.
    #[instrument(skip_all, fields(question_number = question_number, history = history.len()))]
    pub async fn generate_next_question(
        &self,
        context: &CandidateContext,
        history: &[HistoryEntry],
        question_number: u8,
    ) -> Result<Routed<Question>, RouterError> {
        if !NEXT_QUESTION_RANGE.contains(&question_number) {
            return Err(RouterError::InvalidInput(format!(
                "question number must be between {} and {}, got {question_number}",
                NEXT_QUESTION_RANGE.start(),
                NEXT_QUESTION_RANGE.end()
            )));
        }

        self.route(
            Operation::NextQuestion,
            move |p: Arc<dyn CapabilityProvider>| async move {
                p.generate_next_question(context, history, question_number)
                    .await
            },
            || defaults::next_question(&context.role, question_number),
        )
        .await
    }

    /// Scores an answer. Too-brief answers get a fixed low score without any
    /// provider call.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when every provider failed without content.
    #[instrument(skip_all, fields(answer_chars = answer.len()))]
    pub async fn evaluate_answer(
        &self,
        question_text: &str,
        answer: &str,
        context: &CandidateContext,
        history: &[HistoryEntry],
    ) -> Result<Routed<Evaluation>, RouterError> {
        if let Some(evaluation) = deterministic::precheck_answer(answer) {
            return Ok(Routed::deterministic(evaluation));
        }

        self.route(
            Operation::EvaluateAnswer,
            move |p: Arc<dyn CapabilityProvider>| async move {
                p.evaluate_answer(question_text, answer, context, history)
                    .await
            },
            || defaults::evaluation(answer, &context.role),
        )
        .await
    }

    /// Summarizes the interview. With no evaluations the fixed "no data"
    /// report is returned without any provider call.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when every provider failed without content.
    #[instrument(skip_all, fields(evaluations = evaluations.len()))]
    pub async fn generate_final_report(
        &self,
        context: &CandidateContext,
        history: &[HistoryEntry],
        evaluations: &[Evaluation],
    ) -> Result<Routed<InterviewReport>, RouterError> {
        if let Some(report) = deterministic::precheck_report(evaluations) {
            return Ok(Routed::deterministic(report));
        }

        self.route(
            Operation::FinalReport,
            move |p: Arc<dyn CapabilityProvider>| async move {
                p.generate_final_report(context, history, evaluations)
                    .await
            },
            || {
                ScoreSummary::from_evaluations(evaluations)
                    .map_or_else(defaults::empty_report, |scores| defaults::report(&scores))
            },
        )
        .await
    }

    /// Scores a candidate against a job description.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when every provider failed without content.
    #[instrument(skip_all, fields(job = %job.title))]
    pub async fn calculate_job_fit(
        &self,
        context: &CandidateContext,
        job: &JobDescription,
    ) -> Result<Routed<JobFit>, RouterError> {
        self.route(
            Operation::JobFit,
            move |p: Arc<dyn CapabilityProvider>| async move {
                p.calculate_job_fit(context, job).await
            },
            || {
                defaults::job_fit(&SkillMatch::compute(
                    &context.skills,
                    context.experience_years,
                    job,
                ))
            },
        )
        .await
    }

    /// Generates `count` (1 through 20) aptitude questions.
    ///
    /// The deterministic set holds [`defaults::CANNED_APTITUDE_COUNT`]
    /// questions, so a recovered result is shorter than `count` when more
    /// were asked for.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidInput`] for an out-of-range count, otherwise
    /// [`RouterError`] when every provider failed without content.
    #[instrument(skip_all, fields(difficulty = %difficulty, count = count))]
    pub async fn generate_aptitude_questions(
        &self,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Routed<Vec<AptitudeQuestion>>, RouterError> {
        if !APTITUDE_COUNT_RANGE.contains(&count) {
            return Err(RouterError::InvalidInput(format!(
                "aptitude question count must be between {} and {}, got {count}",
                APTITUDE_COUNT_RANGE.start(),
                APTITUDE_COUNT_RANGE.end()
            )));
        }

        self.route(
            Operation::AptitudeQuestions,
            move |p: Arc<dyn CapabilityProvider>| async move {
                p.generate_aptitude_questions(difficulty, count).await
            },
            || {
                let mut questions = defaults::aptitude_questions(difficulty);
                questions.truncate(count);
                questions
            },
        )
        .await
    }

    /// Grades an aptitude answer. Deterministic; no provider is involved.
    pub fn evaluate_aptitude_answer(
        &self,
        question: &AptitudeQuestion,
        answer: &str,
    ) -> AptitudeResult {
        question.grade(answer)
    }

    // ========================================================================
    // Operator Controls
    // ========================================================================

    /// Makes `provider` the primary if a fresh probe finds it available.
    ///
    /// Returns false, leaving the preference unchanged, otherwise.
    #[instrument(skip_all, fields(provider = %provider))]
    pub async fn force(&self, provider: ProviderId) -> bool {
        let report = self.health.probe(self.provider(provider).as_ref()).await;
        if report.available {
            self.preference.set_primary(provider).await;
            info!("Forced primary provider");
            true
        } else {
            warn!(
                reason = report.detail.as_deref().unwrap_or("unavailable"),
                "Cannot force an unavailable provider"
            );
            false
        }
    }

    /// Like [`force`](Self::force), taking a provider name. Unknown names
    /// return false.
    pub async fn force_by_name(&self, name: &str) -> bool {
        match name.parse::<ProviderId>() {
            Ok(provider) => self.force(provider).await,
            Err(e) => {
                warn!(error = %e, "Cannot force provider");
                false
            }
        }
    }

    /// Restores the startup preference. Usage counters are kept.
    pub async fn reset(&self) -> Preference {
        self.preference.reset().await
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Availability, preference and usage counters.
    pub async fn status(&self) -> RouterStatus {
        let mut providers = Vec::with_capacity(ProviderId::all().len());
        for &id in ProviderId::all() {
            let report = self.health.last_report(id).await;
            providers.push(ProviderHealth {
                id,
                available: report.as_ref().is_some_and(|r| r.available),
                info: self.provider(id).describe().await,
                detail: report.as_ref().and_then(|r| r.detail.clone()),
                last_probe: report.map(|r| r.checked_at),
            });
        }

        RouterStatus {
            providers,
            preference: self.preference.get().await,
            default_preference: self.preference.default_preference(),
            empty_results: self.empty_results,
            stats: self.stats.snapshot().await,
        }
    }

    /// Health report with operator recommendations.
    pub async fn health(&self) -> HealthReport {
        HealthReport::from_status(&self.status().await)
    }
}
