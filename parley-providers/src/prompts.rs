//! Prompt rendering.
//!
//! Every prompt asks for JSON only; [`extract`](crate::extract) tolerates
//! the prose and code fences models add anyway.

use std::fmt::Write as _;

use parley_core::{
    CandidateContext, Difficulty, EntryKind, HistoryEntry, JobDescription, QuestionFocus,
    ResumeData, ScoreSummary, SkillMatch,
};

use crate::backend::PromptStyle;

/// Work history entries included in the domain analysis prompt.
const WORK_HISTORY_ENTRIES: usize = 3;

fn join(items: &[String]) -> String {
    if items.is_empty() {
        "none listed".to_string()
    } else {
        items.join(", ")
    }
}

/// Renders the conversation under the style's context budget.
pub fn transcript(history: &[HistoryEntry], style: PromptStyle) -> String {
    let start = style
        .history_window
        .map_or(0, |window| history.len().saturating_sub(window));

    let mut out = String::new();
    for entry in &history[start..] {
        match entry.kind {
            EntryKind::Question => {
                let _ = writeln!(out, "Q{}: {}", entry.question_number, entry.content.trim());
            }
            EntryKind::Answer => {
                let content = entry.content.trim();
                let excerpt: String = match style.answer_excerpt_chars {
                    Some(limit) if content.chars().count() > limit => {
                        let cut: String = content.chars().take(limit).collect();
                        format!("{cut}...")
                    }
                    _ => content.to_string(),
                };
                let _ = writeln!(out, "A{}: {}\n", entry.question_number, excerpt);
            }
        }
    }

    if out.is_empty() {
        "(no previous conversation)".to_string()
    } else {
        out
    }
}

/// Domain analysis prompt.
pub fn domain_analysis(resume: &ResumeData, role: &str) -> String {
    let work: Vec<_> = resume
        .work_experience
        .iter()
        .take(WORK_HISTORY_ENTRIES)
        .collect();
    let work = serde_json::to_string(&work).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Analyze this candidate profile and extract key domain signals.

Role: {role}
Skills: {skills}
Experience: {years} years
Work Experience: {work}

Return ONLY a JSON object:
{{
    "primary_domain": "frontend|backend|fullstack|mobile|devops|data|ml|other",
    "technical_depth": "beginner|intermediate|advanced|expert",
    "key_technologies": ["tech1", "tech2", "tech3"],
    "specializations": ["spec1"],
    "industry_experience": ["industry1"]
}}"#,
        skills = join(&resume.skills),
        years = resume.experience_years,
    )
}

/// Opening question prompt.
pub fn first_question(context: &CandidateContext) -> String {
    format!(
        r#"Generate the first interview question for a {level} {role} candidate.

Candidate Context:
- Primary Domain: {domain}
- Technical Depth: {depth}
- Interview Type: {kind}

The question must be general and welcoming, use a professional tone, and
invite the candidate to share their background.

Return ONLY a JSON object:
{{
    "text": "Your question here",
    "type": "introductory",
    "expected_intent": "background_overview",
    "difficulty": "easy"
}}"#,
        level = context.experience_level,
        role = context.role,
        domain = context.domain_analysis.primary_domain,
        depth = context.domain_analysis.technical_depth,
        kind = context.interview_type,
    )
}

/// Follow-up question prompt.
pub fn next_question(
    context: &CandidateContext,
    history: &[HistoryEntry],
    question_number: u8,
    style: PromptStyle,
) -> String {
    let focus = QuestionFocus::for_number(question_number);
    format!(
        r#"Generate question {question_number} of 8 for a {role} interview.

Candidate Context:
- Experience Level: {level}
- Primary Domain: {domain}
- Key Technologies: {tech}

Previous Conversation:
{conversation}

This question should explore {focus}. Build on what the candidate has
already said; do not repeat earlier questions.

Return ONLY a JSON object:
{{
    "text": "Your adaptive question here",
    "type": "technical|problem_solving|behavioral|situational|role_fit",
    "expected_intent": "what the question probes",
    "expected_keywords": ["keyword1", "keyword2"],
    "difficulty": "easy|medium|hard"
}}"#,
        role = context.role,
        level = context.experience_level,
        domain = context.domain_analysis.primary_domain,
        tech = join(&context.domain_analysis.key_technologies),
        conversation = transcript(history, style),
        focus = focus.description(),
    )
}

/// Answer evaluation prompt.
pub fn evaluation(
    question_text: &str,
    answer: &str,
    context: &CandidateContext,
    history: &[HistoryEntry],
    style: PromptStyle,
) -> String {
    format!(
        r#"Evaluate this {level} {role} interview answer objectively.

Earlier Conversation:
{conversation}

Question: {question_text}
Answer: {answer}

Score each dimension from 0 to 100 and describe what a strong answer contains.

Return ONLY a JSON object:
{{
    "technical": 75,
    "communication": 80,
    "confidence": 70,
    "relevance": 85,
    "notes": "A strong answer should include ..."
}}"#,
        level = context.experience_level,
        role = context.role,
        conversation = transcript(history, style),
    )
}

/// Final report prompt.
pub fn report(
    context: &CandidateContext,
    history: &[HistoryEntry],
    scores: &ScoreSummary,
    style: PromptStyle,
) -> String {
    format!(
        r#"Generate a final interview report for a {level} {role} candidate.

Interview Performance:
- Average Technical Score: {technical}/100
- Average Communication Score: {communication}/100
- Average Confidence Score: {confidence}/100
- Average Relevance Score: {relevance}/100
- Questions Answered: {count}

Conversation:
{conversation}

Return ONLY a JSON object:
{{
    "overall_summary": "Summary of performance",
    "technical_score": {technical},
    "communication_score": {communication},
    "confidence_score": {confidence},
    "relevance_score": {relevance},
    "strengths": ["strength1"],
    "gaps": ["gap1"],
    "recommendations": ["recommendation1"]
}}"#,
        level = context.experience_level,
        role = context.role,
        technical = scores.technical,
        communication = scores.communication,
        confidence = scores.confidence,
        relevance = scores.relevance,
        count = scores.count,
        conversation = transcript(history, style),
    )
}

/// Job fit prompt.
pub fn job_fit(context: &CandidateContext, job: &JobDescription, matched: &SkillMatch) -> String {
    format!(
        r#"Analyze job fit between a candidate and a position.

Candidate Profile:
- Current Role: {role}
- Experience: {years} years
- Skills: {skills}

Job Requirements:
- Position: {title}
- Required Experience: {required_years} years
- Required Skills: {required}
- Preferred Skills: {preferred}

Exact skill overlap: {overlap}% of required skills.

Return ONLY a JSON object:
{{
    "overall_fit_score": 80,
    "skill_match_percentage": {overlap},
    "experience_match_percentage": 90,
    "missing_skills": ["skill1"],
    "matched_skills": ["skill2"],
    "role_suitability": "One-line verdict",
    "recommendations": ["recommendation1"]
}}"#,
        role = context.role,
        years = context.experience_years,
        skills = join(&context.skills),
        title = job.title,
        required_years = job.required_experience_years,
        required = join(&job.required_skills),
        preferred = join(&job.preferred_skills),
        overlap = matched.skill_percentage,
    )
}

/// Aptitude question prompt.
pub fn aptitude(difficulty: Difficulty, count: usize) -> String {
    format!(
        r#"Generate {count} aptitude and logical reasoning questions for a technical interview.

Difficulty: {difficulty}
Mix quantitative reasoning, logical puzzles, and pattern recognition.
Each question has exactly 4 options prefixed "A)" to "D)".

Return ONLY a JSON array:
[
    {{
        "question": "Question text",
        "options": ["A) ...", "B) ...", "C) ...", "D) ..."],
        "correct_answer": "A) ...",
        "explanation": "Step-by-step reasoning",
        "type": "quantitative|logical|pattern",
        "difficulty": "{difficulty}"
    }}
]"#
    )
}
