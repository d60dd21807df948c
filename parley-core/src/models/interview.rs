//! Interview records.
//!
//! This module contains the records exchanged across an interview session:
//! - [`ResumeData`] - Parsed resume input
//! - [`CandidateContext`] - Profile understanding derived from a resume
//! - [`Question`] / [`HistoryEntry`] - Conversational questions and transcript
//! - [`Evaluation`] - Per-answer scores
//! - [`InterviewReport`] - End-of-session summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::traits::Payload;

// ============================================================================
// Resume & Candidate Context
// ============================================================================

/// Structured resume data as produced by the upstream resume parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    /// Candidate name.
    pub name: Option<String>,
    /// Current or target role.
    pub role: Option<String>,
    /// Listed skills.
    pub skills: Vec<String>,
    /// Total years of professional experience.
    pub experience_years: f64,
    /// Education entries.
    pub education: Vec<String>,
    /// Work history entries (free-form).
    pub work_experience: Vec<serde_json::Value>,
    /// Notable projects.
    pub projects: Vec<String>,
}

/// Seniority bucket derived from years of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    /// Less than two years.
    #[serde(rename = "Junior")]
    Junior,
    /// Two to five years.
    #[serde(rename = "Mid-Level")]
    MidLevel,
    /// Five to ten years.
    #[serde(rename = "Senior")]
    Senior,
    /// Ten years or more.
    #[serde(rename = "Lead/Principal")]
    LeadPrincipal,
}

impl ExperienceLevel {
    /// Buckets a number of years: `<2`, `<5`, `<10`, else lead.
    pub fn from_years(years: f64) -> Self {
        if years < 2.0 {
            Self::Junior
        } else if years < 5.0 {
            Self::MidLevel
        } else if years < 10.0 {
            Self::Senior
        } else {
            Self::LeadPrincipal
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::MidLevel => "Mid-Level",
            Self::Senior => "Senior",
            Self::LeadPrincipal => "Lead/Principal",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Domain signals a provider extracts from a candidate profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainAnalysis {
    /// Primary domain (frontend, backend, fullstack, data, ...).
    pub primary_domain: String,
    /// Technical depth (beginner, intermediate, advanced, expert).
    pub technical_depth: String,
    /// Most relevant technologies.
    #[serde(default)]
    pub key_technologies: Vec<String>,
    /// Specializations.
    #[serde(default)]
    pub specializations: Vec<String>,
    /// Industries the candidate has worked in.
    #[serde(default)]
    pub industry_experience: Vec<String>,
}

impl DomainAnalysis {
    /// Default analysis used to fill gaps: fullstack, intermediate, and the
    /// first three skills as key technologies.
    pub fn fallback(skills: &[String]) -> Self {
        Self {
            primary_domain: "fullstack".to_string(),
            technical_depth: "intermediate".to_string(),
            key_technologies: skills.iter().take(3).cloned().collect(),
            specializations: Vec::new(),
            industry_experience: Vec::new(),
        }
    }
}

/// Profile understanding the interview is conditioned on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateContext {
    /// Role being interviewed for.
    pub role: String,
    /// Interview type (technical, behavioral, mixed, ...).
    pub interview_type: String,
    /// Years of experience.
    pub experience_years: f64,
    /// Seniority bucket, always computed locally.
    pub experience_level: ExperienceLevel,
    /// Candidate skills.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Education entries.
    #[serde(default)]
    pub education: Vec<String>,
    /// Work history entries.
    #[serde(default)]
    pub work_experience: Vec<serde_json::Value>,
    /// Provider-derived domain signals.
    pub domain_analysis: DomainAnalysis,
    /// When the context was built.
    pub created_at: DateTime<Utc>,
}

impl CandidateContext {
    /// Builds a context from a resume and a domain analysis.
    pub fn new(
        resume: &ResumeData,
        role: &str,
        interview_type: &str,
        domain_analysis: DomainAnalysis,
    ) -> Self {
        Self {
            role: role.to_string(),
            interview_type: interview_type.to_string(),
            experience_years: resume.experience_years,
            experience_level: ExperienceLevel::from_years(resume.experience_years),
            skills: resume.skills.clone(),
            education: resume.education.clone(),
            work_experience: resume.work_experience.clone(),
            domain_analysis,
            created_at: Utc::now(),
        }
    }
}

impl Payload for CandidateContext {
    fn is_empty_payload(&self) -> bool {
        self.domain_analysis.primary_domain.trim().is_empty()
    }
}

// ============================================================================
// Questions
// ============================================================================

/// Question difficulty, shared by interview and aptitude questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    #[default]
    Medium,
    /// Hard.
    Hard,
}

impl Difficulty {
    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(CoreError::InvalidInput(format!(
                "difficulty must be easy, medium or hard, got '{other}'"
            ))),
        }
    }
}

/// Kind of interview question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Opening background question.
    Introductory,
    /// Technical skills and experience.
    Technical,
    /// Problem-solving approach.
    ProblemSolving,
    /// Past behavior.
    Behavioral,
    /// Hypothetical scenario.
    Situational,
    /// Role fit and career goals.
    RoleFit,
    /// Follow-up that does not fit another kind.
    Adaptive,
}

impl FromStr for QuestionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "introductory" => Ok(Self::Introductory),
            "technical" => Ok(Self::Technical),
            "problem_solving" => Ok(Self::ProblemSolving),
            "behavioral" | "behavioural" => Ok(Self::Behavioral),
            "situational" => Ok(Self::Situational),
            "role_fit" => Ok(Self::RoleFit),
            "adaptive" => Ok(Self::Adaptive),
            other => Err(CoreError::InvalidInput(format!(
                "unknown question type '{other}'"
            ))),
        }
    }
}

/// Focus area of a follow-up question, selected by question number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFocus {
    /// Questions 2 and 3.
    TechnicalSkills,
    /// Questions 4 and 5.
    ProblemSolving,
    /// Questions 6 and 7.
    Behavioral,
    /// Question 8.
    RoleFit,
}

impl QuestionFocus {
    /// Focus for a question number: `<=3` technical, `<=5` problem solving,
    /// `<=7` behavioral, otherwise role fit.
    pub fn for_number(question_number: u8) -> Self {
        match question_number {
            0..=3 => Self::TechnicalSkills,
            4..=5 => Self::ProblemSolving,
            6..=7 => Self::Behavioral,
            _ => Self::RoleFit,
        }
    }

    /// Prompt phrase describing this focus.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TechnicalSkills => "technical skills and hands-on experience",
            Self::ProblemSolving => "problem-solving approach and challenges overcome",
            Self::Behavioral => "behavioral and situational scenarios",
            Self::RoleFit => "role fit and career goals",
        }
    }

    /// Question type used when a provider omits one.
    pub fn default_type(&self) -> QuestionType {
        match self {
            Self::TechnicalSkills => QuestionType::Technical,
            Self::ProblemSolving => QuestionType::ProblemSolving,
            Self::Behavioral => QuestionType::Behavioral,
            Self::RoleFit => QuestionType::RoleFit,
        }
    }
}

/// A conversational interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier (`q1`..`q8`).
    pub id: String,
    /// Question text.
    pub text: String,
    /// Kind of question.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// What the question is probing for.
    pub expected_intent: String,
    /// Keywords a strong answer would contain.
    #[serde(default)]
    pub expected_keywords: Vec<String>,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// When the question was generated.
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Returns the canonical id for a question number.
    pub fn id_for(question_number: u8) -> String {
        format!("q{question_number}")
    }
}

impl Payload for Question {
    fn is_empty_payload(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Whether a transcript entry is a question or an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Interviewer question.
    Question,
    /// Candidate answer.
    Answer,
}

/// One entry of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Question or answer.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Question number this entry belongs to.
    pub question_number: u8,
    /// Entry text.
    pub content: String,
}

impl HistoryEntry {
    /// Creates a question entry.
    pub fn question(question_number: u8, content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Question,
            question_number,
            content: content.into(),
        }
    }

    /// Creates an answer entry.
    pub fn answer(question_number: u8, content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Answer,
            question_number,
            content: content.into(),
        }
    }
}

// ============================================================================
// Evaluation & Report
// ============================================================================

/// Scores for a single answer, each in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Technical competency and depth.
    pub technical: u8,
    /// Communication clarity.
    pub communication: u8,
    /// Confidence.
    pub confidence: u8,
    /// Relevance to the question.
    pub relevance: u8,
    /// Guidance on what a strong answer would contain.
    pub notes: String,
    /// When the evaluation was produced.
    pub created_at: DateTime<Utc>,
}

impl Evaluation {
    /// Creates an evaluation with every score set to `score`.
    pub fn uniform(score: u8, notes: impl Into<String>) -> Self {
        let score = score.min(100);
        Self {
            technical: score,
            communication: score,
            confidence: score,
            relevance: score,
            notes: notes.into(),
            created_at: Utc::now(),
        }
    }
}

impl Payload for Evaluation {
    /// All-zero scores with notes still count as content.
    fn is_empty_payload(&self) -> bool {
        self.notes.trim().is_empty()
            && self.technical == 0
            && self.communication == 0
            && self.confidence == 0
            && self.relevance == 0
    }
}

/// Rounded averages over a set of evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Average technical score.
    pub technical: u8,
    /// Average communication score.
    pub communication: u8,
    /// Average confidence score.
    pub confidence: u8,
    /// Average relevance score.
    pub relevance: u8,
    /// Number of evaluations averaged.
    pub count: usize,
}

impl ScoreSummary {
    /// Averages the evaluations. Returns `None` for an empty slice.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Option<Self> {
        if evaluations.is_empty() {
            return None;
        }
        let n = evaluations.len() as f64;
        let avg = |f: fn(&Evaluation) -> u8| {
            let sum: f64 = evaluations.iter().map(|e| f64::from(f(e))).sum();
            (sum / n).round().clamp(0.0, 100.0) as u8
        };
        Some(Self {
            technical: avg(|e| e.technical),
            communication: avg(|e| e.communication),
            confidence: avg(|e| e.confidence),
            relevance: avg(|e| e.relevance),
            count: evaluations.len(),
        })
    }
}

/// End-of-session summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewReport {
    /// Narrative summary.
    pub overall_summary: String,
    /// Average technical score.
    pub technical_score: u8,
    /// Average communication score.
    pub communication_score: u8,
    /// Average confidence score.
    pub confidence_score: u8,
    /// Average relevance score.
    pub relevance_score: u8,
    /// Number of evaluated answers.
    pub questions_answered: usize,
    /// Observed strengths.
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Observed gaps.
    #[serde(default)]
    pub gaps: Vec<String>,
    /// Recommendations for the candidate.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl Payload for InterviewReport {
    fn is_empty_payload(&self) -> bool {
        self.overall_summary.trim().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
