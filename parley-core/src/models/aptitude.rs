//! Aptitude assessment records.

use serde::{Deserialize, Serialize};

use super::interview::Difficulty;

/// Reasoning category of an aptitude question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AptitudeCategory {
    /// Arithmetic and quantitative reasoning.
    #[default]
    Quantitative,
    /// Logical puzzles.
    Logical,
    /// Pattern recognition.
    Pattern,
}

impl AptitudeCategory {
    /// Parses a provider-supplied category, if recognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantitative" => Some(Self::Quantitative),
            "logical" => Some(Self::Logical),
            "pattern" => Some(Self::Pattern),
            _ => None,
        }
    }
}

/// A multiple-choice aptitude question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptitudeQuestion {
    /// Identifier (`apt_1`, `apt_2`, ...).
    pub id: String,
    /// Question text.
    pub question: String,
    /// Answer options, usually four prefixed `A)`..`D)`.
    pub options: Vec<String>,
    /// The correct option, verbatim.
    pub correct_answer: String,
    /// Reasoning steps.
    #[serde(default)]
    pub explanation: String,
    /// Reasoning category.
    #[serde(default, rename = "type")]
    pub category: AptitudeCategory,
    /// Difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl AptitudeQuestion {
    /// Grades an answer: trimmed, case-insensitive exact match. No partial credit.
    pub fn grade(&self, answer: &str) -> AptitudeResult {
        let correct = answer.trim().to_lowercase() == self.correct_answer.trim().to_lowercase();
        AptitudeResult {
            correct,
            score: if correct { 100 } else { 0 },
            correct_answer: self.correct_answer.clone(),
            explanation: self.explanation.clone(),
            user_answer: answer.to_string(),
        }
    }
}

/// Outcome of grading one aptitude answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptitudeResult {
    /// Whether the answer matched.
    pub correct: bool,
    /// 100 when correct, otherwise 0.
    pub score: u8,
    /// The expected answer.
    pub correct_answer: String,
    /// Reasoning steps.
    pub explanation: String,
    /// The answer as submitted.
    pub user_answer: String,
}
