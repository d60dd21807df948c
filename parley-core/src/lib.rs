// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Parley Core
//!
//! Core types, models, and traits shared by every Parley crate.
//!
//! This crate provides the foundational abstractions, including:
//!
//! - Domain models (candidate context, questions, evaluations, reports)
//! - The [`CapabilityProvider`] trait implemented by the local and cloud backends
//! - Error types for providers and input validation
//! - Router-facing status and preference types
//! - [`defaults`] - Deterministic records used when no provider can answer
//!
//! ## Key Types
//!
//! ### Providers & Routing
//! - [`ProviderId`] - The two backends (`local`, `cloud`)
//! - [`Tier`] - Which tier served a result (deterministic, local, cloud)
//! - [`Preference`] - Primary provider and fallback flag
//! - [`EmptyResultPolicy`] - Whether empty provider output counts as failure
//!
//! ### Interview Records
//! - [`CandidateContext`] / [`DomainAnalysis`] - Profile understanding
//! - [`Question`] / [`HistoryEntry`] - Conversational questions
//! - [`Evaluation`] / [`InterviewReport`] - Scoring and the final report
//!
//! ### Assessment Records
//! - [`JobDescription`] / [`JobFit`] - Job fit scoring
//! - [`AptitudeQuestion`] / [`AptitudeResult`] - Aptitude questions and grading
//!
//! ### Status
//! - [`RouterStatus`] - Availability, preference and usage counters
//! - [`HealthReport`] - Overall health with operator recommendations

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::{CoreError, ProviderError};

// Re-export all model types
pub use models::{
    // Aptitude
    AptitudeCategory,
    AptitudeQuestion,
    AptitudeResult,
    // Interview
    CandidateContext,
    Difficulty,
    DomainAnalysis,
    EntryKind,
    Evaluation,
    ExperienceLevel,
    HistoryEntry,
    InterviewReport,
    Question,
    QuestionFocus,
    QuestionType,
    ResumeData,
    ScoreSummary,
    // Job fit
    JobDescription,
    JobFit,
    SkillMatch,
    // Providers & routing
    EmptyResultPolicy,
    Preference,
    ProviderId,
    ProviderInfo,
    Tier,
    // Status
    HealthReport,
    OverallHealth,
    ProbeReport,
    ProviderHealth,
    RouterStatus,
    StatsSnapshot,
};

// Re-export traits
pub use traits::{CapabilityProvider, Payload};
