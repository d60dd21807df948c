//! Trait definitions for Parley.
//!
//! This module defines the contract every backend must satisfy and the
//! emptiness check the router applies to successful results.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{
    AptitudeQuestion, AptitudeResult, CandidateContext, Difficulty, Evaluation, HistoryEntry,
    InterviewReport, JobDescription, JobFit, ProbeReport, ProviderId, ProviderInfo, Question,
    ResumeData,
};

// ============================================================================
// Capability Provider
// ============================================================================

/// A backend capable of performing the full interview operation set.
///
/// Implementors are responsible for:
/// - Rendering each operation into a request for their backend
/// - Parsing the reply and normalizing it into a complete record
/// - Reporting their own availability through [`probe`](Self::probe)
///
/// Every operation returns `Err` rather than a placeholder when the backend
/// fails, so the router can decide whether to fall back.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Identity of this provider.
    fn id(&self) -> ProviderId;

    /// Configuration echo (endpoint, model, credential presence).
    async fn describe(&self) -> ProviderInfo;

    /// Checks whether the provider is usable right now.
    ///
    /// Never fails: network errors are reported as `available = false`.
    async fn probe(&self) -> ProbeReport;

    /// Derives the domain analysis for a candidate and builds the context.
    async fn extract_context(
        &self,
        resume: &ResumeData,
        role: &str,
        interview_type: &str,
    ) -> Result<CandidateContext, ProviderError>;

    /// Generates the introductory question.
    async fn generate_first_question(
        &self,
        context: &CandidateContext,
    ) -> Result<Question, ProviderError>;

    /// Generates an adaptive follow-up question (numbers 2 through 8).
    async fn generate_next_question(
        &self,
        context: &CandidateContext,
        history: &[HistoryEntry],
        question_number: u8,
    ) -> Result<Question, ProviderError>;

    /// Scores an answer.
    async fn evaluate_answer(
        &self,
        question_text: &str,
        answer: &str,
        context: &CandidateContext,
        history: &[HistoryEntry],
    ) -> Result<Evaluation, ProviderError>;

    /// Summarizes a finished interview.
    async fn generate_final_report(
        &self,
        context: &CandidateContext,
        history: &[HistoryEntry],
        evaluations: &[Evaluation],
    ) -> Result<InterviewReport, ProviderError>;

    /// Scores a candidate against a job description.
    async fn calculate_job_fit(
        &self,
        context: &CandidateContext,
        job: &JobDescription,
    ) -> Result<JobFit, ProviderError>;

    /// Generates multiple-choice aptitude questions.
    async fn generate_aptitude_questions(
        &self,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<AptitudeQuestion>, ProviderError>;

    /// Grades an aptitude answer. Exact matching needs no backend call.
    fn evaluate_aptitude_answer(&self, question: &AptitudeQuestion, answer: &str) -> AptitudeResult {
        question.grade(answer)
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Content-emptiness check for operation results.
///
/// A result that is empty by content (blank text, empty list) is rejected by
/// the router under [`EmptyResultPolicy::Reject`](crate::EmptyResultPolicy).
pub trait Payload {
    /// Returns true if the value carries no usable content.
    fn is_empty_payload(&self) -> bool;
}

impl<T> Payload for Vec<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl Payload for String {
    fn is_empty_payload(&self) -> bool {
        self.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_payload() {
        assert!(Vec::<u8>::new().is_empty_payload());
        assert!(!vec![1].is_empty_payload());
    }

    #[test]
    fn test_string_payload() {
        assert!("   ".to_string().is_empty_payload());
        assert!(!"hello".to_string().is_empty_payload());
    }
}
