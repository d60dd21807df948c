//! Text output formatting with score bars and colors.

use parley_core::{
    AptitudeQuestion, AptitudeResult, CandidateContext, EmptyResultPolicy, Evaluation,
    HealthReport, InterviewReport, JobFit, OverallHealth, ProviderHealth, Question, QuestionType,
    RouterStatus,
};
use parley_router::Routed;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

// Score bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    // ========================================================================
    // Router state
    // ========================================================================

    /// Formats availability, preference and usage counters.
    pub fn format_status(&self, status: &RouterStatus) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold("Parley Status"));
        lines.push("─".repeat(40));
        for provider in &status.providers {
            lines.push(self.format_provider(provider));
        }

        lines.push(String::new());
        let preference = &status.preference;
        let mut primary = format!("Primary:   {}", self.cyan(preference.primary.display_name()));
        if *preference != status.default_preference {
            primary.push_str(&format!(
                " {}",
                self.dim(&format!(
                    "(default {})",
                    status.default_preference.primary.display_name()
                ))
            ));
        }
        lines.push(primary);
        lines.push(format!(
            "Fallback:  {}",
            if preference.fallback_enabled {
                self.green("enabled")
            } else {
                self.yellow("disabled")
            }
        ));
        lines.push(format!(
            "Empty:     {}",
            match status.empty_results {
                EmptyResultPolicy::Reject => "rejected",
                EmptyResultPolicy::Accept => "accepted",
            }
        ));

        lines.push(String::new());
        lines.push(self.dim("Usage:"));
        for provider in &status.providers {
            lines.push(format!(
                "  {:<16} {} requests",
                provider.id.display_name(),
                status.stats.requests(provider.id)
            ));
        }
        lines.push(format!("  {:<16} {}", "Fallbacks", status.stats.fallback_count));
        if let Some(last) = status.stats.last_used {
            lines.push(format!("  {:<16} {}", "Last used", last.display_name()));
        }

        lines.join("\n")
    }

    /// Formats a health report with recommendations.
    pub fn format_health(&self, report: &HealthReport) -> String {
        let mut lines = Vec::new();

        let overall = match report.overall {
            OverallHealth::Healthy => self.green("healthy"),
            OverallHealth::Unhealthy => self.red("unhealthy"),
        };
        lines.push(format!("{} {}", self.bold("Parley Health:"), overall));
        lines.push("─".repeat(40));
        for provider in &report.providers {
            lines.push(self.format_provider(provider));
        }

        if !report.recommendations.is_empty() {
            lines.push(String::new());
            lines.push(self.dim("Recommendations:"));
            for rec in &report.recommendations {
                lines.push(format!("  • {rec}"));
            }
        }

        lines.join("\n")
    }

    fn format_provider(&self, provider: &ProviderHealth) -> String {
        let marker = if provider.available {
            self.green("✓")
        } else {
            self.red("✗")
        };

        let info = &provider.info;
        let mut model = info.model.clone();
        if info.effective_model != info.model {
            model = format!("{} → {}", info.model, info.effective_model);
        }

        let mut line = format!(
            "{} {:<16} {} {}",
            marker,
            provider.id.display_name(),
            model,
            self.dim(&info.endpoint)
        );
        if let Some(detail) = &provider.detail {
            line.push_str(&format!("\n    {}", self.dim(detail)));
        }
        line
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// Formats the tier that served a result and the providers tried.
    pub fn format_served_by<T>(&self, routed: &Routed<T>) -> String {
        let mut line = if routed.is_deterministic() {
            format!("Served by {}", self.yellow("deterministic"))
        } else if routed.used_fallback() {
            format!("Served by {} after fallback", self.cyan(&routed.served_by.to_string()))
        } else {
            format!("Served by {}", self.cyan(&routed.served_by.to_string()))
        };
        let failed: Vec<String> = routed
            .attempts
            .iter()
            .filter_map(|a| {
                a.rejection
                    .as_ref()
                    .map(|r| format!("{} {}", a.provider, r))
            })
            .collect();
        if !failed.is_empty() {
            line.push_str(&format!(" {}", self.dim(&format!("({})", failed.join("; ")))));
        }
        line
    }

    /// Formats a candidate context.
    pub fn format_context(&self, context: &CandidateContext) -> String {
        let analysis = &context.domain_analysis;
        let mut lines = vec![
            format!("{} ({})", self.bold(&context.role), context.interview_type),
            "─".repeat(40),
            format!(
                "Experience: {} ({} years)",
                context.experience_level, context.experience_years
            ),
            format!("Domain:     {}", self.cyan(&analysis.primary_domain)),
            format!("Depth:      {}", analysis.technical_depth),
        ];
        if !context.skills.is_empty() {
            lines.push(format!("Skills:     {}", context.skills.join(", ")));
        }
        if !analysis.key_technologies.is_empty() {
            lines.push(format!(
                "Tech:       {}",
                analysis.key_technologies.join(", ")
            ));
        }
        if !analysis.specializations.is_empty() {
            lines.push(format!(
                "Focus:      {}",
                analysis.specializations.join(", ")
            ));
        }
        lines.join("\n")
    }

    /// Formats an interview question.
    pub fn format_question(&self, question: &Question) -> String {
        let mut lines = vec![
            format!(
                "{} {}",
                self.bold(&format!("[{}]", question.id)),
                self.dim(&format!(
                    "{} · {}",
                    question_type_label(question.question_type),
                    question.difficulty
                ))
            ),
            question.text.clone(),
        ];
        if !question.expected_keywords.is_empty() {
            lines.push(self.dim(&format!(
                "Keywords: {}",
                question.expected_keywords.join(", ")
            )));
        }
        lines.join("\n")
    }

    /// Formats an answer evaluation.
    pub fn format_evaluation(&self, evaluation: &Evaluation) -> String {
        let mut lines = vec![
            self.score_line("Technical", evaluation.technical),
            self.score_line("Communication", evaluation.communication),
            self.score_line("Confidence", evaluation.confidence),
            self.score_line("Relevance", evaluation.relevance),
        ];
        if !evaluation.notes.is_empty() {
            lines.push(String::new());
            lines.push(evaluation.notes.clone());
        }
        lines.join("\n")
    }

    /// Formats a final report.
    pub fn format_report(&self, report: &InterviewReport) -> String {
        let mut lines = vec![
            self.bold("Interview Report"),
            "─".repeat(40),
            report.overall_summary.clone(),
            String::new(),
            self.score_line("Technical", report.technical_score),
            self.score_line("Communication", report.communication_score),
            self.score_line("Confidence", report.confidence_score),
            self.score_line("Relevance", report.relevance_score),
            format!("{:<14} {}", "Answered:", report.questions_answered),
        ];
        self.push_list(&mut lines, "Strengths:", &report.strengths);
        self.push_list(&mut lines, "Gaps:", &report.gaps);
        self.push_list(&mut lines, "Recommendations:", &report.recommendations);
        lines.join("\n")
    }

    /// Formats a job-fit assessment.
    pub fn format_job_fit(&self, fit: &JobFit) -> String {
        let mut lines = vec![
            self.bold("Job Fit"),
            "─".repeat(40),
            self.score_line("Overall", fit.overall_fit_score),
            self.score_line("Skills", fit.skill_match_percentage),
            self.score_line("Experience", fit.experience_match_percentage),
        ];
        if !fit.matched_skills.is_empty() {
            lines.push(format!(
                "{:<14} {}",
                "Matched:",
                self.green(&fit.matched_skills.join(", "))
            ));
        }
        if !fit.missing_skills.is_empty() {
            lines.push(format!(
                "{:<14} {}",
                "Missing:",
                self.red(&fit.missing_skills.join(", "))
            ));
        }
        lines.push(String::new());
        lines.push(fit.role_suitability.clone());
        self.push_list(&mut lines, "Recommendations:", &fit.recommendations);
        lines.join("\n")
    }

    /// Formats aptitude questions without their answers.
    pub fn format_aptitude(&self, questions: &[AptitudeQuestion]) -> String {
        let mut blocks = Vec::new();
        for q in questions {
            let mut lines = vec![format!(
                "{} {}",
                self.bold(&format!("[{}]", q.id)),
                self.dim(&format!("{:?} · {}", q.category, q.difficulty).to_lowercase())
            )];
            lines.push(q.question.clone());
            for option in &q.options {
                lines.push(format!("  {option}"));
            }
            blocks.push(lines.join("\n"));
        }
        blocks.join("\n\n")
    }

    /// Formats a graded aptitude answer.
    pub fn format_aptitude_result(&self, result: &AptitudeResult) -> String {
        let verdict = if result.correct {
            self.green("Correct")
        } else {
            self.red("Incorrect")
        };
        let mut lines = vec![format!("{} ({}/100)", verdict, result.score)];
        if !result.correct {
            lines.push(format!("Expected: {}", self.blue(&result.correct_answer)));
        }
        if !result.explanation.is_empty() {
            lines.push(self.dim(&result.explanation));
        }
        lines.join("\n")
    }

    /// Formats a score bar.
    pub fn progress_bar(&self, score: u8) -> String {
        let score = score.min(100);
        let filled = (usize::from(score) * self.bar_width + 50) / 100;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_score(score, &bar)
    }

    fn score_line(&self, label: &str, score: u8) -> String {
        format!(
            "{:<14} {} {}",
            format!("{label}:"),
            self.progress_bar(score),
            self.color_for_score(score, &format!("{score:>3}"))
        )
    }

    fn push_list(&self, lines: &mut Vec<String>, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        lines.push(String::new());
        lines.push(self.dim(title));
        for item in items {
            lines.push(format!("  • {item}"));
        }
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_score(&self, score: u8, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if score < 40 {
            self.red(text)
        } else if score < 70 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

fn question_type_label(kind: QuestionType) -> &'static str {
    match kind {
        QuestionType::Introductory => "introductory",
        QuestionType::Technical => "technical",
        QuestionType::ProblemSolving => "problem solving",
        QuestionType::Behavioral => "behavioral",
        QuestionType::Situational => "situational",
        QuestionType::RoleFit => "role fit",
        QuestionType::Adaptive => "adaptive",
    }
}
