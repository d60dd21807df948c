//! Job fit records.

use serde::{Deserialize, Serialize};

use crate::traits::Payload;

/// Requirements of an open position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescription {
    /// Position title.
    pub title: String,
    /// Must-have skills.
    pub required_skills: Vec<String>,
    /// Nice-to-have skills.
    pub preferred_skills: Vec<String>,
    /// Minimum years of experience.
    pub required_experience_years: f64,
}

/// Candidate-versus-job scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFit {
    /// Overall score (0..=100).
    pub overall_fit_score: u8,
    /// Share of required skills the candidate has (0..=100).
    pub skill_match_percentage: u8,
    /// Experience relative to the requirement (0..=100).
    pub experience_match_percentage: u8,
    /// Required skills the candidate lacks.
    #[serde(default)]
    pub missing_skills: Vec<String>,
    /// Required skills the candidate has.
    #[serde(default)]
    pub matched_skills: Vec<String>,
    /// One-line verdict.
    pub role_suitability: String,
    /// Suggested next steps.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl Payload for JobFit {
    fn is_empty_payload(&self) -> bool {
        self.role_suitability.trim().is_empty()
    }
}

/// Local skill and experience matching.
///
/// Skill comparison is case-insensitive; the reported names keep the job
/// description's spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    /// Required skills present in the candidate's list.
    pub matched: Vec<String>,
    /// Required skills absent from the candidate's list.
    pub missing: Vec<String>,
    /// `matched / required * 100`, or 50 with no requirements.
    pub skill_percentage: u8,
    /// `years / required * 100` capped at 100, or 75 with no requirement.
    pub experience_percentage: u8,
    /// Mean of the unrounded skill and experience percentages.
    pub overall_percentage: u8,
}

impl SkillMatch {
    /// Computes the match between candidate skills/years and a job.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn compute(skills: &[String], years: f64, job: &JobDescription) -> Self {
        let have: Vec<String> = skills.iter().map(|s| s.trim().to_lowercase()).collect();
        let (matched, missing): (Vec<String>, Vec<String>) = job
            .required_skills
            .iter()
            .cloned()
            .partition(|req| have.contains(&req.trim().to_lowercase()));

        let skill_percentage = if job.required_skills.is_empty() {
            50.0
        } else {
            matched.len() as f64 / job.required_skills.len() as f64 * 100.0
        };

        let experience_percentage = if job.required_experience_years > 0.0 {
            (years / job.required_experience_years * 100.0).min(100.0)
        } else {
            75.0
        };

        let pct = |v: f64| v.round().clamp(0.0, 100.0) as u8;
        Self {
            matched,
            missing,
            skill_percentage: pct(skill_percentage),
            experience_percentage: pct(experience_percentage),
            overall_percentage: pct((skill_percentage + experience_percentage) / 2.0),
        }
    }
}
