//! Response normalization.
//!
//! Provider replies are loosely shaped. Each function here turns a parsed
//! reply into a complete record: provider values take precedence, the
//! deterministic defaults fill whatever is missing, and scores are clamped
//! to `0..=100`. Numeric strings (`"85"`, `"85%"`) are accepted as scores.

use chrono::Utc;
use parley_core::{
    defaults, AptitudeCategory, AptitudeQuestion, Difficulty, DomainAnalysis, Evaluation,
    InterviewReport, JobFit, ProviderError, Question, QuestionType, ScoreSummary, SkillMatch,
};
use serde_json::{Map, Value};
use tracing::debug;

type Object = Map<String, Value>;

// ============================================================================
// Field Helpers
// ============================================================================

/// Reads a score from a number or numeric string, clamped to `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    raw.is_finite()
        .then(|| raw.round().clamp(0.0, 100.0) as u8)
}

fn score_field(map: &Object, keys: &[&str]) -> Option<u8> {
    keys.iter().find_map(|k| map.get(*k).and_then(score))
}

fn text_field(map: &Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        map.get(*k)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    })
}

fn list_field(map: &Object, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter().find_map(|k| {
        map.get(*k).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
    })
}

// ============================================================================
// Context
// ============================================================================

/// Domain analysis with fallback values for missing fields.
pub fn domain_analysis(map: &Object, skills: &[String]) -> DomainAnalysis {
    let fallback = DomainAnalysis::fallback(skills);
    DomainAnalysis {
        primary_domain: text_field(map, &["primary_domain", "domain"])
            .unwrap_or(fallback.primary_domain),
        technical_depth: text_field(map, &["technical_depth", "depth"])
            .unwrap_or(fallback.technical_depth),
        key_technologies: list_field(map, &["key_technologies", "technologies"])
            .filter(|v| !v.is_empty())
            .unwrap_or(fallback.key_technologies),
        specializations: list_field(map, &["specializations"])
            .unwrap_or(fallback.specializations),
        industry_experience: list_field(map, &["industry_experience", "industries"])
            .unwrap_or(fallback.industry_experience),
    }
}

// ============================================================================
// Questions
// ============================================================================

/// Question built over `template`; the reply must carry question text.
///
/// The template's id is kept so numbering never depends on the provider.
///
/// # Errors
///
/// [`ProviderError::Malformed`] if the reply has no question text.
pub fn question(map: &Object, template: Question) -> Result<Question, ProviderError> {
    let text = text_field(map, &["text", "question"])
        .ok_or_else(|| ProviderError::Malformed("question reply has no text".to_string()))?;

    let question_type = text_field(map, &["type", "question_type"])
        .and_then(|t| t.parse::<QuestionType>().ok())
        .unwrap_or(template.question_type);

    let difficulty = text_field(map, &["difficulty"])
        .and_then(|d| d.parse::<Difficulty>().ok())
        .unwrap_or(template.difficulty);

    Ok(Question {
        id: template.id,
        text,
        question_type,
        expected_intent: text_field(map, &["expected_intent", "intent"])
            .unwrap_or(template.expected_intent),
        expected_keywords: list_field(map, &["expected_keywords", "keywords"])
            .unwrap_or(template.expected_keywords),
        difficulty,
        created_at: Utc::now(),
    })
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluation with missing dimensions filled from the ones present.
///
/// # Errors
///
/// [`ProviderError::Malformed`] if the reply carries no score at all.
pub fn evaluation(map: &Object, role: &str) -> Result<Evaluation, ProviderError> {
    let technical = score_field(map, &["technical", "technical_score"]);
    let communication = score_field(map, &["communication", "communication_score"]);
    let confidence = score_field(map, &["confidence", "confidence_score"]);
    let relevance = score_field(map, &["relevance", "relevance_score"]);

    let present: Vec<u8> = [technical, communication, confidence, relevance]
        .into_iter()
        .flatten()
        .collect();
    if present.is_empty() {
        return Err(ProviderError::Malformed(
            "evaluation reply has no scores".to_string(),
        ));
    }

    let sum: u32 = present.iter().map(|s| u32::from(*s)).sum();
    let count = u32::try_from(present.len()).unwrap_or(1);
    let mean = u8::try_from((sum + count / 2) / count).unwrap_or(100);

    Ok(Evaluation {
        technical: technical.unwrap_or(mean),
        communication: communication.unwrap_or(mean),
        confidence: confidence.unwrap_or(mean),
        relevance: relevance.unwrap_or(mean),
        notes: text_field(map, &["notes", "expected_answer", "feedback"])
            .unwrap_or_else(|| defaults::evaluation_notes(role)),
        created_at: Utc::now(),
    })
}

// ============================================================================
// Report
// ============================================================================

/// Report with missing fields filled from averaged scores.
pub fn report(map: &Object, scores: &ScoreSummary) -> InterviewReport {
    InterviewReport {
        overall_summary: text_field(map, &["overall_summary", "summary"])
            .unwrap_or_else(|| defaults::report_summary(scores)),
        technical_score: score_field(map, &["technical_score"]).unwrap_or(scores.technical),
        communication_score: score_field(map, &["communication_score"])
            .unwrap_or(scores.communication),
        confidence_score: score_field(map, &["confidence_score", "behavioral_score"])
            .unwrap_or(scores.confidence),
        relevance_score: score_field(map, &["relevance_score"]).unwrap_or(scores.relevance),
        questions_answered: scores.count,
        strengths: list_field(map, &["strengths", "technical_strengths"])
            .unwrap_or_else(|| defaults::report_strengths(scores)),
        gaps: list_field(map, &["gaps", "technical_gaps"])
            .unwrap_or_else(|| defaults::report_gaps(scores)),
        recommendations: list_field(map, &["recommendations"])
            .filter(|v| !v.is_empty())
            .unwrap_or_else(defaults::report_recommendations),
    }
}

// ============================================================================
// Job Fit
// ============================================================================

/// Job fit with missing fields filled from local skill matching.
pub fn job_fit(map: &Object, matched: &SkillMatch) -> JobFit {
    let fallback = defaults::job_fit(matched);
    JobFit {
        overall_fit_score: score_field(map, &["overall_fit_score", "overall_score"])
            .unwrap_or(fallback.overall_fit_score),
        skill_match_percentage: score_field(map, &["skill_match_percentage"])
            .unwrap_or(fallback.skill_match_percentage),
        experience_match_percentage: score_field(map, &["experience_match_percentage"])
            .unwrap_or(fallback.experience_match_percentage),
        missing_skills: list_field(map, &["missing_skills", "missing_required_skills"])
            .unwrap_or(fallback.missing_skills),
        matched_skills: list_field(map, &["matched_skills"]).unwrap_or(fallback.matched_skills),
        role_suitability: text_field(map, &["role_suitability", "suitability"])
            .unwrap_or(fallback.role_suitability),
        recommendations: list_field(map, &["recommendations"])
            .filter(|v| !v.is_empty())
            .unwrap_or(fallback.recommendations),
    }
}

// ============================================================================
// Aptitude
// ============================================================================

/// Aptitude questions, renumbered `apt_1..` and truncated to `count`.
///
/// Items without question text, options, or a correct answer are dropped.
/// An empty list passes through as an empty result.
///
/// # Errors
///
/// [`ProviderError::Malformed`] if the list has items but none is usable.
pub fn aptitude(
    items: &[Value],
    difficulty: Difficulty,
    count: usize,
) -> Result<Vec<AptitudeQuestion>, ProviderError> {
    let questions: Vec<AptitudeQuestion> = items
        .iter()
        .filter_map(|item| {
            let parsed = item.as_object().and_then(|map| aptitude_item(map, difficulty));
            if parsed.is_none() {
                debug!("Dropping incomplete aptitude item");
            }
            parsed
        })
        .take(count)
        .enumerate()
        .map(|(i, mut q)| {
            q.id = format!("apt_{}", i + 1);
            q
        })
        .collect();

    if questions.is_empty() && !items.is_empty() {
        return Err(ProviderError::Malformed(
            "no complete aptitude question in reply".to_string(),
        ));
    }
    Ok(questions)
}

fn aptitude_item(map: &Object, difficulty: Difficulty) -> Option<AptitudeQuestion> {
    let question = text_field(map, &["question", "text"])?;
    let options = list_field(map, &["options", "choices"]).filter(|o| !o.is_empty())?;
    let answer = text_field(map, &["correct_answer", "answer"])?;
    let correct_answer = resolve_option(&options, &answer);

    Some(AptitudeQuestion {
        id: String::new(),
        question,
        options,
        correct_answer,
        explanation: text_field(map, &["explanation", "reasoning"]).unwrap_or_default(),
        category: text_field(map, &["type", "category"])
            .and_then(|c| AptitudeCategory::parse(&c))
            .unwrap_or_default(),
        difficulty: text_field(map, &["difficulty"])
            .and_then(|d| d.parse().ok())
            .unwrap_or(difficulty),
    })
}

/// Expands a bare option letter (`"A"`, `"a)"`) to the full option text.
fn resolve_option(options: &[String], answer: &str) -> String {
    let letter = answer.trim().trim_end_matches(')').trim();
    if letter.chars().count() == 1 {
        let prefix = format!("{})", letter.to_uppercase());
        if let Some(option) = options
            .iter()
            .find(|o| o.trim_start().to_uppercase().starts_with(&prefix))
        {
            return option.clone();
        }
    }
    answer.to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::QuestionType;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_score_variants() {
        assert_eq!(score(&json!(85)), Some(85));
        assert_eq!(score(&json!(85.6)), Some(86));
        assert_eq!(score(&json!("72")), Some(72));
        assert_eq!(score(&json!("90%")), Some(90));
        assert_eq!(score(&json!(140)), Some(100));
        assert_eq!(score(&json!(-3)), Some(0));
        assert_eq!(score(&json!("high")), None);
        assert_eq!(score(&json!(null)), None);
    }

    #[test]
    fn test_domain_analysis_fills_gaps() {
        let skills = vec!["rust".to_string(), "go".to_string()];
        let analysis = domain_analysis(&obj(json!({"primary_domain": "backend"})), &skills);
        assert_eq!(analysis.primary_domain, "backend");
        assert_eq!(analysis.technical_depth, "intermediate");
        assert_eq!(analysis.key_technologies, skills);
    }

    #[test]
    fn test_question_keeps_template_id() {
        let template = defaults::next_question("SRE", 5);
        let q = question(
            &obj(json!({"id": "q99", "text": "How do you debug outages?", "type": "situational"})),
            template,
        )
        .unwrap();
        assert_eq!(q.id, "q5");
        assert_eq!(q.question_type, QuestionType::Situational);
        assert_eq!(q.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_question_requires_text() {
        let err = question(&obj(json!({"type": "technical"})), defaults::first_question("x"))
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_evaluation_fills_missing_confidence() {
        let e = evaluation(
            &obj(json!({"technical": 80, "communication": "90", "relevance": 70})),
            "SRE",
        )
        .unwrap();
        assert_eq!(e.confidence, 80);
        assert_eq!(e.communication, 90);
        assert!(e.notes.contains("SRE"));
    }

    #[test]
    fn test_evaluation_all_zero_accepted() {
        let e = evaluation(
            &obj(json!({"technical": 0, "communication": 0, "confidence": 0, "relevance": 0})),
            "SRE",
        )
        .unwrap();
        assert_eq!(e.technical, 0);
        assert!(!e.notes.is_empty());
    }

    #[test]
    fn test_evaluation_without_scores_is_malformed() {
        assert!(
            evaluation(&obj(json!({"notes": "fine"})), "SRE")
                .unwrap_err()
                .is_malformed()
        );
    }

    #[test]
    fn test_report_aliases_and_defaults() {
        let scores = ScoreSummary::from_evaluations(&[Evaluation::uniform(60, "n")]).unwrap();
        let r = report(
            &obj(json!({"technical_strengths": ["APIs"], "behavioral_score": 75})),
            &scores,
        );
        assert_eq!(r.strengths, vec!["APIs"]);
        assert_eq!(r.confidence_score, 75);
        assert_eq!(r.technical_score, 60);
        assert_eq!(r.questions_answered, 1);
        assert!(r.overall_summary.contains("Technical 60%"));
        assert_eq!(r.recommendations.len(), 2);
    }

    #[test]
    fn test_job_fit_prefers_provider_values() {
        let job = parley_core::JobDescription {
            title: "SRE".into(),
            required_skills: vec!["linux".into()],
            preferred_skills: vec![],
            required_experience_years: 2.0,
        };
        let matched = SkillMatch::compute(&["Linux".to_string()], 1.0, &job);
        let fit = job_fit(&obj(json!({"overall_fit_score": "88"})), &matched);
        assert_eq!(fit.overall_fit_score, 88);
        assert_eq!(fit.skill_match_percentage, 100);
        assert_eq!(fit.experience_match_percentage, 50);
        assert_eq!(fit.role_suitability, defaults::DEFAULT_ROLE_SUITABILITY);
    }

    #[test]
    fn test_aptitude_renumbers_and_truncates() {
        let items = vec![
            json!({"id": "x", "question": "Q1", "options": ["A) 1", "B) 2"], "correct_answer": "A) 1"}),
            json!({"question": "broken"}),
            json!({"question": "Q2", "options": ["A) 3", "B) 4"], "correct_answer": "b", "type": "pattern"}),
            json!({"question": "Q3", "options": ["A) 5"], "correct_answer": "A) 5"}),
        ];
        let qs = aptitude(&items, Difficulty::Easy, 2).unwrap();
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].id, "apt_1");
        assert_eq!(qs[1].id, "apt_2");
        assert_eq!(qs[1].correct_answer, "B) 4");
        assert_eq!(qs[1].category, AptitudeCategory::Pattern);
        assert_eq!(qs[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_aptitude_none_usable() {
        let err = aptitude(&[json!({"question": "no options"})], Difficulty::Medium, 5)
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_aptitude_empty_list_passes_through() {
        assert!(aptitude(&[], Difficulty::Hard, 3).unwrap().is_empty());
    }
}
