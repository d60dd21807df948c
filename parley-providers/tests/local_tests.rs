//! Local provider tests against a mock Ollama server.

use mockito::{Matcher, Server};
use parley_core::{
    CapabilityProvider, Difficulty, DomainAnalysis, Evaluation, HistoryEntry, ProviderError,
    QuestionType, ResumeData,
};
use parley_providers::{LocalConfig, LocalProvider};
use serde_json::json;

fn provider(server: &Server) -> LocalProvider {
    LocalProvider::new(LocalConfig {
        base_url: server.url(),
        ..LocalConfig::default()
    })
    .unwrap()
}

fn generate_body(text: &str) -> String {
    json!({ "model": "llama3.1:8b", "response": text, "done": true }).to_string()
}

fn context() -> parley_core::CandidateContext {
    let resume = ResumeData {
        skills: vec!["Rust".into(), "Postgres".into()],
        experience_years: 4.0,
        ..ResumeData::default()
    };
    parley_core::CandidateContext::new(
        &resume,
        "Backend Engineer",
        "technical",
        DomainAnalysis::fallback(&resume.skills),
    )
}

// ============================================================================
// Probe
// ============================================================================

#[tokio::test]
async fn test_probe_with_configured_model() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"models":[{"name":"llama3.1:8b"}]}"#)
        .create_async()
        .await;

    let local = provider(&server);
    let report = local.probe().await;

    assert!(report.available);
    assert!(report.effective_model.is_none());
    assert_eq!(local.describe().await.effective_model, "llama3.1:8b");
}

#[tokio::test]
async fn test_probe_degrades_to_first_model() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[{"name":"mistral:7b"},{"name":"phi3:mini"}]}"#)
        .create_async()
        .await;
    let generate = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({"model": "mistral:7b", "stream": false})))
        .with_status(200)
        .with_body(generate_body(r#"{"text": "What do you build?"}"#))
        .create_async()
        .await;

    let local = provider(&server);
    let report = local.probe().await;
    assert!(report.available);
    assert_eq!(report.effective_model.as_deref(), Some("mistral:7b"));

    let question = local.generate_first_question(&context()).await.unwrap();
    generate.assert_async().await;
    assert_eq!(question.text, "What do you build?");
}

#[tokio::test]
async fn test_probe_without_models_is_unavailable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[]}"#)
        .create_async()
        .await;

    let report = provider(&server).probe().await;
    assert!(!report.available);
    assert_eq!(report.detail.as_deref(), Some("no models installed"));
}

#[tokio::test]
async fn test_probe_server_error_is_unavailable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(500)
        .create_async()
        .await;

    assert!(!provider(&server).probe().await.available);
}

// ============================================================================
// Operations
// ============================================================================

#[tokio::test]
async fn test_first_question_is_introductory() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(generate_body(
            "Here you go:\n```json\n{\"id\": \"x\", \"text\": \"Tell me about yourself.\", \"type\": \"technical\", \"difficulty\": \"hard\"}\n```",
        ))
        .create_async()
        .await;

    let question = provider(&server)
        .generate_first_question(&context())
        .await
        .unwrap();

    assert_eq!(question.id, "q1");
    assert_eq!(question.text, "Tell me about yourself.");
    assert_eq!(question.question_type, QuestionType::Introductory);
    assert_eq!(question.difficulty, Difficulty::Easy);
}

#[tokio::test]
async fn test_next_question_sends_recent_history_only() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::Regex("A3: third answer".to_string()))
        .with_status(200)
        .with_body(generate_body(r#"{"text": "How did you scale it?"}"#))
        .create_async()
        .await;

    let history = vec![
        HistoryEntry::question(1, "first question"),
        HistoryEntry::answer(1, "first answer"),
        HistoryEntry::question(2, "second question"),
        HistoryEntry::answer(2, "second answer"),
        HistoryEntry::question(3, "third question"),
        HistoryEntry::answer(3, "third answer"),
    ];

    let question = provider(&server)
        .generate_next_question(&context(), &history, 4)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(question.id, "q4");
    assert_eq!(question.question_type, QuestionType::ProblemSolving);
}

#[tokio::test]
async fn test_evaluate_accepts_string_scores() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(generate_body(
            r#"{"technical": "70", "communication": 90, "relevance": 80, "expected_answer": "Mention indexes."}"#,
        ))
        .create_async()
        .await;

    let eval = provider(&server)
        .evaluate_answer(
            "How do you tune queries?",
            "I look at the query plan first and add indexes.",
            &context(),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(eval.technical, 70);
    assert_eq!(eval.confidence, 80);
    assert_eq!(eval.notes, "Mention indexes.");
}

#[tokio::test]
async fn test_blank_reply_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(generate_body("   "))
        .create_async()
        .await;

    let err = provider(&server)
        .generate_first_question(&context())
        .await
        .unwrap_err();
    assert_eq!(err, ProviderError::Empty);
}

#[tokio::test]
async fn test_prose_reply_is_malformed() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(generate_body("I would ask about their background."))
        .create_async()
        .await;

    let err = provider(&server)
        .generate_first_question(&context())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Malformed(_)));
}

#[tokio::test]
async fn test_server_error_is_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(500)
        .with_body("model crashed")
        .create_async()
        .await;

    let err = provider(&server)
        .generate_first_question(&context())
        .await
        .unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_report_with_no_evaluations_skips_backend() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .expect(0)
        .create_async()
        .await;

    let report = provider(&server)
        .generate_final_report(&context(), &[], &[])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        report.overall_summary,
        "No evaluation data available for this session."
    );
}

#[tokio::test]
async fn test_report_fills_scores() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(generate_body(r#"{"overall_summary": "Solid backend skills."}"#))
        .create_async()
        .await;

    let evals = vec![Evaluation::uniform(80, "a"), Evaluation::uniform(60, "b")];
    let report = provider(&server)
        .generate_final_report(&context(), &[], &evals)
        .await
        .unwrap();

    assert_eq!(report.overall_summary, "Solid backend skills.");
    assert_eq!(report.technical_score, 70);
    assert_eq!(report.questions_answered, 2);
}

#[tokio::test]
async fn test_extract_context_computes_level_locally() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(generate_body(
            r#"{"primary_domain": "backend", "technical_depth": "advanced"}"#,
        ))
        .create_async()
        .await;

    let resume = ResumeData {
        skills: vec!["Go".into()],
        experience_years: 12.0,
        ..ResumeData::default()
    };
    let ctx = provider(&server)
        .extract_context(&resume, "Staff Engineer", "technical")
        .await
        .unwrap();

    assert_eq!(ctx.experience_level, parley_core::ExperienceLevel::LeadPrincipal);
    assert_eq!(ctx.domain_analysis.primary_domain, "backend");
    assert_eq!(ctx.domain_analysis.key_technologies, vec!["Go"]);
}
