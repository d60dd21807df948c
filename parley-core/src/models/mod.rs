//! Domain models for Parley.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider identity, tiers, preference and policy
//! - [`interview`] - Candidate context, questions, evaluations, reports
//! - [`job_fit`] - Job descriptions and fit scoring
//! - [`aptitude`] - Aptitude questions and grading
//! - [`status`] - Probe results, router status and health reports

mod aptitude;
mod interview;
mod job_fit;
mod provider;
mod status;

// Re-export everything at the models level
pub use aptitude::{AptitudeCategory, AptitudeQuestion, AptitudeResult};
pub use interview::{
    CandidateContext, Difficulty, DomainAnalysis, EntryKind, Evaluation, ExperienceLevel,
    HistoryEntry, InterviewReport, Question, QuestionFocus, QuestionType, ResumeData, ScoreSummary,
};
pub use job_fit::{JobDescription, JobFit, SkillMatch};
pub use provider::{EmptyResultPolicy, Preference, ProviderId, ProviderInfo, Tier};
pub use status::{
    HealthReport, OverallHealth, ProbeReport, ProviderHealth, RouterStatus, StatsSnapshot,
};
