//! Routed operation names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation the router dispatches to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Build the candidate context.
    ExtractContext,
    /// Generate the introductory question.
    FirstQuestion,
    /// Generate a follow-up question.
    NextQuestion,
    /// Score an answer.
    EvaluateAnswer,
    /// Summarize the interview.
    FinalReport,
    /// Score a candidate against a job.
    JobFit,
    /// Generate aptitude questions.
    AptitudeQuestions,
}

impl Operation {
    /// Stable name used in logs and errors.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ExtractContext => "extract_context",
            Operation::FirstQuestion => "first_question",
            Operation::NextQuestion => "next_question",
            Operation::EvaluateAnswer => "evaluate_answer",
            Operation::FinalReport => "final_report",
            Operation::JobFit => "job_fit",
            Operation::AptitudeQuestions => "aptitude_questions",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
