//! Deterministic default records.
//!
//! These values are produced without any provider. The router returns them
//! for pre-checked inputs and when both providers reply with unusable
//! content; providers use them to fill fields a reply left out.

use chrono::Utc;

use crate::models::{
    AptitudeCategory, AptitudeQuestion, CandidateContext, Difficulty, DomainAnalysis, Evaluation,
    InterviewReport, JobFit, Question, QuestionFocus, QuestionType, ResumeData, ScoreSummary,
    SkillMatch,
};

/// Answers shorter than this (after trimming) are not sent to a provider.
pub const MIN_ANSWER_CHARS: usize = 10;

/// Score given to every dimension of a too-brief answer.
pub const BRIEF_ANSWER_SCORE: u8 = 20;

/// Notes attached to a too-brief answer.
pub const BRIEF_ANSWER_NOTES: &str =
    "Answer was too brief. Please provide more detailed responses.";

/// Summary of a report with no evaluations.
pub const NO_EVALUATIONS_SUMMARY: &str = "No evaluation data available for this session.";

/// Verdict used when a job fit reply omits one.
pub const DEFAULT_ROLE_SUITABILITY: &str = "Good fit with some skill development needed";

/// Returns true if the answer is too short to evaluate.
pub fn is_brief_answer(answer: &str) -> bool {
    answer.trim().chars().count() < MIN_ANSWER_CHARS
}

// ============================================================================
// Context
// ============================================================================

/// Context with the fallback domain analysis.
pub fn context(resume: &ResumeData, role: &str, interview_type: &str) -> CandidateContext {
    CandidateContext::new(
        resume,
        role,
        interview_type,
        DomainAnalysis::fallback(&resume.skills),
    )
}

// ============================================================================
// Questions
// ============================================================================

/// The fixed opening question.
pub fn first_question(role: &str) -> Question {
    Question {
        id: Question::id_for(1),
        text: format!(
            "Thank you for joining us today! Could you start by telling me about your background and experience as a {role}?"
        ),
        question_type: QuestionType::Introductory,
        expected_intent: "background_overview".to_string(),
        expected_keywords: Vec::new(),
        difficulty: Difficulty::Easy,
        created_at: Utc::now(),
    }
}

/// Text of the fixed follow-up question for a number.
pub fn next_question_text(role: &str, question_number: u8) -> String {
    match question_number {
        2 => format!(
            "Based on what you've shared, what specific technologies do you work with most in your {role} role?"
        ),
        3 => "Can you walk me through your approach to solving complex technical challenges?"
            .to_string(),
        4 => "Tell me about a recent project that you found particularly challenging or rewarding."
            .to_string(),
        5 => "How do you handle situations when requirements change mid-project?".to_string(),
        6 => "Describe how you collaborate with team members when there are differing technical opinions."
            .to_string(),
        7 => "What aspects of this role and our technology stack interest you most?".to_string(),
        8 => "Where do you see your technical career heading in the next few years?".to_string(),
        _ => "Tell me more about your experience.".to_string(),
    }
}

/// The fixed follow-up question for a number.
pub fn next_question(role: &str, question_number: u8) -> Question {
    let focus = QuestionFocus::for_number(question_number);
    Question {
        id: Question::id_for(question_number),
        text: next_question_text(role, question_number),
        question_type: focus.default_type(),
        expected_intent: "experience_exploration".to_string(),
        expected_keywords: Vec::new(),
        difficulty: Difficulty::Medium,
        created_at: Utc::now(),
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluation of a too-brief answer.
pub fn brief_answer_evaluation() -> Evaluation {
    Evaluation::uniform(BRIEF_ANSWER_SCORE, BRIEF_ANSWER_NOTES)
}

/// Length heuristic: two points per word, between 40 and 85.
pub fn heuristic_score(answer: &str) -> u8 {
    let words = answer.split_whitespace().count();
    let score = words.saturating_mul(2).clamp(40, 85);
    u8::try_from(score).unwrap_or(85)
}

/// Generic guidance on what a strong answer contains.
pub fn evaluation_notes(role: &str) -> String {
    format!(
        "For this {role} question, a strong answer should demonstrate relevant experience, specific examples, and clear technical understanding of the concepts discussed."
    )
}

/// Heuristic evaluation of an answer.
pub fn evaluation(answer: &str, role: &str) -> Evaluation {
    Evaluation::uniform(heuristic_score(answer), evaluation_notes(role))
}

// ============================================================================
// Report
// ============================================================================

/// Report for a session with no evaluations.
pub fn empty_report() -> InterviewReport {
    InterviewReport {
        overall_summary: NO_EVALUATIONS_SUMMARY.to_string(),
        technical_score: 0,
        communication_score: 0,
        confidence_score: 0,
        relevance_score: 0,
        questions_answered: 0,
        strengths: Vec::new(),
        gaps: Vec::new(),
        recommendations: Vec::new(),
    }
}

/// One-line summary of averaged scores.
pub fn report_summary(scores: &ScoreSummary) -> String {
    format!(
        "Completed interview with average scores: Technical {}%, Communication {}%, Confidence {}%, Relevance {}%.",
        scores.technical, scores.communication, scores.confidence, scores.relevance
    )
}

/// Default strengths for averaged scores.
pub fn report_strengths(scores: &ScoreSummary) -> Vec<String> {
    if scores.technical >= 70 {
        vec!["Demonstrated technical knowledge".to_string()]
    } else {
        Vec::new()
    }
}

/// Default gaps for averaged scores.
pub fn report_gaps(scores: &ScoreSummary) -> Vec<String> {
    if scores.technical < 70 {
        vec!["Continue developing technical skills".to_string()]
    } else {
        Vec::new()
    }
}

/// Default recommendations for a finished interview.
pub fn report_recommendations() -> Vec<String> {
    vec![
        "Practice more interview scenarios".to_string(),
        "Focus on providing specific examples".to_string(),
    ]
}

/// Report computed from averaged scores.
pub fn report(scores: &ScoreSummary) -> InterviewReport {
    InterviewReport {
        overall_summary: report_summary(scores),
        technical_score: scores.technical,
        communication_score: scores.communication,
        confidence_score: scores.confidence,
        relevance_score: scores.relevance,
        questions_answered: scores.count,
        strengths: report_strengths(scores),
        gaps: report_gaps(scores),
        recommendations: report_recommendations(),
    }
}

// ============================================================================
// Job Fit
// ============================================================================

/// Default recommendations for a job fit.
pub fn job_fit_recommendations() -> Vec<String> {
    vec![
        "Develop missing technical skills".to_string(),
        "Gain more relevant experience".to_string(),
    ]
}

/// Job fit computed locally from skill overlap and experience.
pub fn job_fit(matched: &SkillMatch) -> JobFit {
    JobFit {
        overall_fit_score: matched.overall_percentage,
        skill_match_percentage: matched.skill_percentage,
        experience_match_percentage: matched.experience_percentage,
        missing_skills: matched.missing.clone(),
        matched_skills: matched.matched.clone(),
        role_suitability: DEFAULT_ROLE_SUITABILITY.to_string(),
        recommendations: job_fit_recommendations(),
    }
}

// ============================================================================
// Aptitude
// ============================================================================

/// Question, options, index of the correct option, explanation, category.
type CannedAptitude = (&'static str, [&'static str; 4], usize, &'static str, AptitudeCategory);

const CANNED_APTITUDE: [CannedAptitude; 10] = [
    (
        "If a development team of 4 can complete a feature in 6 days, how many days will it take for 6 developers?",
        ["A) 4 days", "B) 3 days", "C) 5 days", "D) 2 days"],
        0,
        "Work = People × Days. 4×6 = 24 person-days. For 6 people: 24÷6 = 4 days",
        AptitudeCategory::Quantitative,
    ),
    (
        "What comes next in the sequence 2, 6, 12, 20, 30, ?",
        ["A) 40", "B) 42", "C) 44", "D) 36"],
        1,
        "The differences grow by 2 each step (4, 6, 8, 10), so the next difference is 12: 30 + 12 = 42",
        AptitudeCategory::Pattern,
    ),
    (
        "All deployments are reviewed. Some reviewed changes are hotfixes. Which statement must be true?",
        [
            "A) All hotfixes are deployments",
            "B) Some deployments are hotfixes",
            "C) Every deployment is reviewed",
            "D) No hotfix is reviewed",
        ],
        2,
        "Only the first premise is certain; nothing links hotfixes to deployments",
        AptitudeCategory::Logical,
    ),
    (
        "A build takes 12 minutes. After an optimization it is 25% faster. How long does it take now?",
        ["A) 8 minutes", "B) 10 minutes", "C) 9 minutes", "D) 3 minutes"],
        2,
        "25% of 12 is 3, so the build takes 12 - 3 = 9 minutes",
        AptitudeCategory::Quantitative,
    ),
    (
        "What comes next in the sequence 1, 1, 2, 3, 5, 8, ?",
        ["A) 11", "B) 12", "C) 13", "D) 15"],
        2,
        "Each term is the sum of the two before it: 5 + 8 = 13",
        AptitudeCategory::Pattern,
    ),
    (
        "If the tests pass, the release ships. The release did not ship. What follows?",
        [
            "A) The tests did not pass",
            "B) The tests passed",
            "C) The release was cancelled",
            "D) Nothing can be concluded",
        ],
        0,
        "By contraposition, if the release did not ship the tests cannot have passed",
        AptitudeCategory::Logical,
    ),
    (
        "A server handles 150 requests per second. How many requests does it handle in 2 minutes?",
        ["A) 9,000", "B) 18,000", "C) 30,000", "D) 300"],
        1,
        "2 minutes is 120 seconds: 150 × 120 = 18,000 requests",
        AptitudeCategory::Quantitative,
    ),
    (
        "Which letter comes next: A, C, F, J, O, ?",
        ["A) T", "B) S", "C) U", "D) V"],
        2,
        "The gaps grow by one letter each step (2, 3, 4, 5), so the next gap is 6: O + 6 = U",
        AptitudeCategory::Pattern,
    ),
    (
        "Ana is older than Ben. Ben is older than Chen. Chen is older than Dev. Who is the second youngest?",
        ["A) Ana", "B) Ben", "C) Chen", "D) Dev"],
        2,
        "From oldest to youngest the order is Ana, Ben, Chen, Dev",
        AptitudeCategory::Logical,
    ),
    (
        "A cache hit takes 2 ms and a miss takes 50 ms. With a 90% hit rate, what is the average lookup time?",
        ["A) 6.8 ms", "B) 26 ms", "C) 5 ms", "D) 7.2 ms"],
        0,
        "0.9 × 2 + 0.1 × 50 = 1.8 + 5 = 6.8 ms",
        AptitudeCategory::Quantitative,
    ),
];

/// The canned aptitude question set, numbered `apt_1..`.
///
/// The set holds [`CANNED_APTITUDE_COUNT`] questions; callers truncate it.
pub fn aptitude_questions(difficulty: Difficulty) -> Vec<AptitudeQuestion> {
    CANNED_APTITUDE
        .iter()
        .enumerate()
        .map(|(i, (question, options, correct, explanation, category))| AptitudeQuestion {
            id: format!("apt_{}", i + 1),
            question: (*question).to_string(),
            options: options.iter().map(ToString::to_string).collect(),
            correct_answer: options[*correct].to_string(),
            explanation: (*explanation).to_string(),
            category: *category,
            difficulty,
        })
        .collect()
}

/// Number of questions in the canned aptitude set.
pub const CANNED_APTITUDE_COUNT: usize = CANNED_APTITUDE.len();
