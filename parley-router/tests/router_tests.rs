//! Router behavior over scripted providers.

mod common;

use common::{context, malformed, transport, Harness, Reply, ScriptedProvider};
use parley_core::{
    defaults, AptitudeQuestion, Difficulty, EmptyResultPolicy, Evaluation, HistoryEntry,
    JobDescription, OverallHealth, Preference, ProviderError, ProviderId, ResumeData, Tier,
};
use parley_router::{Call, Operation, Rejection, RouterConfig, RouterError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ============================================================================
// Selection and fallback
// ============================================================================

#[tokio::test]
async fn test_primary_success_counts_once() {
    let h = Harness::both_up().await;

    let routed = h.router.generate_first_question(&context()).await.unwrap();

    assert_eq!(routed.served_by, Tier::Local);
    assert_eq!(routed.value.text, "local opening question");
    assert_eq!(routed.attempts.len(), 1);
    assert_eq!(h.cloud.calls(), 0);

    let stats = h.router.status().await.stats;
    assert_eq!(stats.requests(ProviderId::Local), 1);
    assert_eq!(stats.requests(ProviderId::Cloud), 0);
    assert_eq!(stats.fallback_count, 0);
    assert_eq!(stats.last_used, Some(ProviderId::Local));
}

#[tokio::test]
async fn test_primary_error_falls_back_once() {
    let h = Harness::both_up().await;
    h.local.set_reply(Reply::Error(transport()));

    let routed = h.router.generate_first_question(&context()).await.unwrap();

    assert_eq!(routed.served_by, Tier::Cloud);
    assert_eq!(routed.value.text, "cloud opening question");
    assert!(routed.used_fallback());
    assert_eq!(h.local.calls(), 1);
    assert_eq!(h.cloud.calls(), 1);

    let stats = h.router.status().await.stats;
    assert_eq!(stats.requests(ProviderId::Local), 1);
    assert_eq!(stats.requests(ProviderId::Cloud), 1);
    assert_eq!(stats.fallback_count, 1);
    assert_eq!(stats.last_used, Some(ProviderId::Cloud));
}

#[tokio::test]
async fn test_empty_primary_result_falls_back() {
    let h = Harness::both_up().await;
    h.local.set_reply(Reply::Empty);

    let routed = h
        .router
        .calculate_job_fit(&context(), &JobDescription::default())
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Cloud);
    assert_eq!(routed.value.role_suitability, "cloud verdict");
    assert_eq!(
        routed.attempts[0].rejection,
        Some(Rejection::EmptyResult)
    );
    assert_eq!(h.router.status().await.stats.fallback_count, 1);
}

#[tokio::test]
async fn test_both_fail_is_terminal_with_fallback_error() {
    let h = Harness::both_up().await;
    h.local.set_reply(Reply::Error(transport()));
    h.cloud.set_reply(Reply::Error(ProviderError::Timeout(30)));

    let err = h.router.generate_first_question(&context()).await.unwrap_err();

    assert_eq!(
        err,
        RouterError::Terminal {
            operation: Operation::FirstQuestion,
            provider: ProviderId::Cloud,
            rejection: Rejection::Failed(ProviderError::Timeout(30)),
        }
    );
    let stats = h.router.status().await.stats;
    assert_eq!(stats.last_used, Some(ProviderId::Cloud));
    assert_eq!(stats.total_requests(), 2);
}

#[tokio::test]
async fn test_unavailable_primary_uses_fallback_provider() {
    let h = Harness::new(
        ScriptedProvider::new(ProviderId::Local, false, Reply::Good),
        ScriptedProvider::new(ProviderId::Cloud, true, Reply::Good),
    )
    .await;

    let routed = h.router.generate_first_question(&context()).await.unwrap();

    assert!(!routed.value.text.is_empty());
    assert_eq!(routed.served_by, Tier::Cloud);
    assert_eq!(h.local.calls(), 0);

    let stats = h.router.status().await.stats;
    assert_eq!(stats.requests(ProviderId::Cloud), 1);
    assert_eq!(stats.requests(ProviderId::Local), 0);
    assert_eq!(stats.fallback_count, 1);
    assert_eq!(stats.last_used, Some(ProviderId::Cloud));
}

#[tokio::test]
async fn test_no_bounce_back_to_unavailable_primary() {
    let h = Harness::new(
        ScriptedProvider::new(ProviderId::Local, false, Reply::Good),
        ScriptedProvider::new(ProviderId::Cloud, true, Reply::Error(transport())),
    )
    .await;

    let err = h.router.generate_first_question(&context()).await.unwrap_err();

    assert!(matches!(
        err,
        RouterError::Rejected {
            provider: ProviderId::Cloud,
            ..
        }
    ));
    assert_eq!(h.local.calls(), 0);
    assert_eq!(h.router.status().await.stats.fallback_count, 1);
}

#[tokio::test]
async fn test_fallback_disabled_propagates_primary_rejection() {
    let h = Harness::with_config(
        ScriptedProvider::new(ProviderId::Local, true, Reply::Error(transport())),
        ScriptedProvider::new(ProviderId::Cloud, true, Reply::Good),
        RouterConfig {
            preference: Preference::new(ProviderId::Local, false),
            ..RouterConfig::default()
        },
    )
    .await;

    let err = h.router.generate_first_question(&context()).await.unwrap_err();

    assert_eq!(
        err,
        RouterError::Rejected {
            operation: Operation::FirstQuestion,
            provider: ProviderId::Local,
            rejection: Rejection::Failed(transport()),
        }
    );
    assert_eq!(h.cloud.calls(), 0);
    assert_eq!(h.router.status().await.stats.fallback_count, 0);
}

#[tokio::test]
async fn test_fallback_disabled_uses_unavailable_primary_anyway() {
    let h = Harness::with_config(
        ScriptedProvider::new(ProviderId::Local, false, Reply::Good),
        ScriptedProvider::new(ProviderId::Cloud, true, Reply::Good),
        RouterConfig {
            preference: Preference::new(ProviderId::Local, false),
            ..RouterConfig::default()
        },
    )
    .await;

    let routed = h.router.generate_first_question(&context()).await.unwrap();

    assert_eq!(routed.served_by, Tier::Local);
    assert_eq!(h.cloud.calls(), 0);
    assert_eq!(h.router.status().await.stats.requests(ProviderId::Local), 1);
}

#[tokio::test]
async fn test_cloud_primary_falls_back_to_local() {
    let h = Harness::with_config(
        ScriptedProvider::new(ProviderId::Local, true, Reply::Good),
        ScriptedProvider::new(ProviderId::Cloud, true, Reply::Error(transport())),
        RouterConfig {
            preference: Preference::new(ProviderId::Cloud, true),
            ..RouterConfig::default()
        },
    )
    .await;

    let routed = h
        .router
        .generate_next_question(&context(), &[], 4)
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Local);
    assert_eq!(routed.value.text, "local question 4");
}

// ============================================================================
// Acceptance and the deterministic tier
// ============================================================================

#[tokio::test]
async fn test_all_zero_evaluation_is_accepted() {
    let h = Harness::both_up().await;
    h.local.set_reply(Reply::ZeroScores);

    let routed = h
        .router
        .evaluate_answer("Explain ownership.", "I am not sure about that.", &context(), &[])
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Local);
    assert_eq!(routed.value.technical, 0);
    assert_eq!(h.cloud.calls(), 0);
}

#[tokio::test]
async fn test_short_answer_never_calls_a_provider() {
    let h = Harness::both_up().await;

    let routed = h
        .router
        .evaluate_answer("Explain ownership.", "  dunno ", &context(), &[])
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Deterministic);
    assert!(routed.attempts.is_empty());
    assert_eq!(routed.value.technical, 20);
    assert_eq!(routed.value.communication, 20);
    assert_eq!(routed.value.confidence, 20);
    assert_eq!(routed.value.relevance, 20);
    assert_eq!(routed.value.notes, defaults::BRIEF_ANSWER_NOTES);
    assert_eq!(h.local.calls() + h.cloud.calls(), 0);
    assert_eq!(h.router.status().await.stats.total_requests(), 0);
}

#[tokio::test]
async fn test_report_without_evaluations_never_calls_a_provider() {
    let h = Harness::both_up().await;

    let routed = h
        .router
        .generate_final_report(&context(), &[], &[])
        .await
        .unwrap();

    assert!(routed.is_deterministic());
    assert_eq!(routed.value.overall_summary, defaults::NO_EVALUATIONS_SUMMARY);
    assert_eq!(routed.value.technical_score, 0);
    assert_eq!(routed.value.communication_score, 0);
    assert_eq!(routed.value.confidence_score, 0);
    assert_eq!(routed.value.relevance_score, 0);
    assert_eq!(h.local.calls() + h.cloud.calls(), 0);
}

#[tokio::test]
async fn test_malformed_on_both_is_recovered() {
    let h = Harness::both_up().await;
    h.local.set_reply(Reply::Error(malformed()));
    h.cloud.set_reply(Reply::Empty);

    let evaluations = vec![Evaluation::uniform(90, "a"), Evaluation::uniform(50, "b")];
    let routed = h
        .router
        .generate_final_report(&context(), &[], &evaluations)
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Deterministic);
    assert_eq!(routed.attempts.len(), 2);
    assert_eq!(routed.value.technical_score, 70);
    assert_eq!(routed.value.questions_answered, 2);
    assert_eq!(h.router.status().await.stats.fallback_count, 1);
}

#[tokio::test]
async fn test_malformed_with_missing_cloud_key_is_recovered() {
    let h = Harness::both_up().await;
    h.local.set_reply(Reply::Error(malformed()));
    h.cloud
        .set_reply(Reply::Error(ProviderError::Unavailable("GEMINI_API_KEY is not set".into())));

    let routed = h.router.generate_first_question(&context()).await.unwrap();

    assert_eq!(routed.served_by, Tier::Deterministic);
    assert_eq!(
        routed.value.text,
        defaults::first_question("Backend Engineer").text
    );
}

#[tokio::test]
async fn test_transport_on_both_is_propagated() {
    let h = Harness::both_up().await;
    h.local.set_reply(Reply::Error(transport()));
    h.cloud.set_reply(Reply::Error(transport()));

    let err = h
        .router
        .extract_context(&ResumeData::default(), "SRE", "technical")
        .await
        .unwrap_err();

    assert!(err.is_terminal());
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_malformed_then_transport_is_propagated() {
    let h = Harness::both_up().await;
    h.local.set_reply(Reply::Error(malformed()));
    h.cloud.set_reply(Reply::Error(transport()));

    let err = h
        .router
        .generate_next_question(&context(), &[], 2)
        .await
        .unwrap_err();

    assert!(matches!(err, RouterError::Terminal { .. }));
}

#[tokio::test]
async fn test_accept_policy_lets_empty_list_through() {
    let h = Harness::with_config(
        ScriptedProvider::new(ProviderId::Local, true, Reply::Empty),
        ScriptedProvider::new(ProviderId::Cloud, true, Reply::Good),
        RouterConfig {
            empty_results: EmptyResultPolicy::Accept,
            ..RouterConfig::default()
        },
    )
    .await;

    let routed = h
        .router
        .generate_aptitude_questions(Difficulty::Hard, 3)
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Local);
    assert!(routed.value.is_empty());
    assert_eq!(h.cloud.calls(), 0);
}

#[tokio::test]
async fn test_reject_policy_recovers_empty_aptitude_list() {
    let h = Harness::new(
        ScriptedProvider::new(ProviderId::Local, true, Reply::Empty),
        ScriptedProvider::new(ProviderId::Cloud, true, Reply::Empty),
    )
    .await;

    let routed = h
        .router
        .generate_aptitude_questions(Difficulty::Easy, 5)
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Deterministic);
    assert_eq!(routed.value.len(), 5);
    assert_eq!(routed.value[0].correct_answer, "A) 4 days");
    let ids: Vec<&str> = routed.value.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["apt_1", "apt_2", "apt_3", "apt_4", "apt_5"]);
}

// ============================================================================
// Input validation and aptitude grading
// ============================================================================

#[tokio::test]
async fn test_out_of_range_inputs_rejected_without_calls() {
    let h = Harness::both_up().await;
    let ctx = context();

    for n in [0, 1, 9] {
        let err = h.router.generate_next_question(&ctx, &[], n).await.unwrap_err();
        assert!(matches!(err, RouterError::InvalidInput(_)), "n = {n}");
    }
    for count in [0, 21] {
        let err = h
            .router
            .generate_aptitude_questions(Difficulty::Medium, count)
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidInput(_)), "count = {count}");
    }

    assert_eq!(h.local.calls() + h.cloud.calls(), 0);
    assert_eq!(h.router.status().await.stats.total_requests(), 0);
}

#[tokio::test]
async fn test_next_question_tolerates_partial_history() {
    let h = Harness::both_up().await;
    let history = vec![HistoryEntry::question(1, "Tell me about yourself.")];

    let routed = h
        .router
        .generate_next_question(&context(), &history, 8)
        .await
        .unwrap();

    assert_eq!(routed.value.id, "q8");
}

#[tokio::test]
async fn test_aptitude_grading_is_case_insensitive() {
    let h = Harness::both_up().await;
    let question = AptitudeQuestion {
        correct_answer: "A) 4 days".into(),
        ..defaults::aptitude_questions(Difficulty::Medium).remove(0)
    };

    let result = h.router.evaluate_aptitude_answer(&question, "a) 4 DAYS");
    assert!(result.correct);
    assert_eq!(result.score, 100);

    let result = h.router.evaluate_aptitude_answer(&question, "A) 4");
    assert!(!result.correct);
    assert_eq!(result.score, 0);
    assert_eq!(h.router.status().await.stats.total_requests(), 0);
}

// ============================================================================
// Operator controls
// ============================================================================

#[tokio::test]
async fn test_force_requires_availability() {
    let h = Harness::new(
        ScriptedProvider::new(ProviderId::Local, true, Reply::Good),
        ScriptedProvider::new(ProviderId::Cloud, false, Reply::Good),
    )
    .await;

    assert!(!h.router.force(ProviderId::Cloud).await);
    assert_eq!(
        h.router.status().await.preference,
        Preference::new(ProviderId::Local, true)
    );

    assert!(h.router.force(ProviderId::Local).await);
}

#[tokio::test]
async fn test_force_reprobes_target() {
    let h = Harness::new(
        ScriptedProvider::new(ProviderId::Local, true, Reply::Good),
        ScriptedProvider::new(ProviderId::Cloud, false, Reply::Good),
    )
    .await;

    h.cloud.set_available(true);
    assert!(h.router.force(ProviderId::Cloud).await);

    let status = h.router.status().await;
    assert_eq!(status.preference.primary, ProviderId::Cloud);
    assert!(status.is_available(ProviderId::Cloud));
}

#[tokio::test]
async fn test_force_by_name() {
    let h = Harness::both_up().await;

    assert!(h.router.force_by_name("Gemini").await);
    assert_eq!(h.router.status().await.preference.primary, ProviderId::Cloud);
    assert!(!h.router.force_by_name("mars").await);
    assert_eq!(h.router.status().await.preference.primary, ProviderId::Cloud);
}

#[tokio::test]
async fn test_reset_restores_preference_and_keeps_stats() {
    let h = Harness::both_up().await;
    h.router.generate_first_question(&context()).await.unwrap();
    assert!(h.router.force(ProviderId::Cloud).await);

    let before = h.router.status().await.stats;
    let restored = h.router.reset().await;

    assert_eq!(restored, Preference::new(ProviderId::Local, true));
    let status = h.router.status().await;
    assert_eq!(status.preference, status.default_preference);
    assert_eq!(status.stats, before);
}

// ============================================================================
// Status and health
// ============================================================================

#[tokio::test]
async fn test_status_reports_providers() {
    let h = Harness::new(
        ScriptedProvider::new(ProviderId::Local, true, Reply::Good),
        ScriptedProvider::new(ProviderId::Cloud, false, Reply::Good),
    )
    .await;

    let status = h.router.status().await;
    assert_eq!(status.providers.len(), 2);
    assert!(status.is_available(ProviderId::Local));
    assert!(!status.is_available(ProviderId::Cloud));

    let cloud = status.provider(ProviderId::Cloud).unwrap();
    assert_eq!(cloud.detail.as_deref(), Some("scripted outage"));
    assert!(cloud.last_probe.is_some());
}

#[tokio::test]
async fn test_health_follows_refresh() {
    let h = Harness::new(
        ScriptedProvider::new(ProviderId::Local, false, Reply::Good),
        ScriptedProvider::new(ProviderId::Cloud, false, Reply::Good),
    )
    .await;
    assert_eq!(h.router.health().await.overall, OverallHealth::Unhealthy);

    h.local.set_available(true);
    assert_eq!(h.router.health().await.overall, OverallHealth::Unhealthy);

    h.router.refresh_health().await;
    let report = h.router.health().await;
    assert_eq!(report.overall, OverallHealth::Healthy);
    assert!(!report.recommendations.is_empty());
}

// ============================================================================
// Execution primitives and concurrency
// ============================================================================

#[tokio::test]
async fn test_fallback_call_is_lazy() {
    let h = Harness::both_up().await;
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);

    let routed = h
        .router
        .execute(
            Operation::FirstQuestion,
            Call::new(ProviderId::Local, async { Ok("primary".to_string()) }),
            Some(Call::new(ProviderId::Cloud, async move {
                flag.store(true, Ordering::SeqCst);
                Ok("fallback".to_string())
            })),
        )
        .await
        .unwrap();

    assert_eq!(routed.value, "primary");
    assert!(!ran.load(Ordering::SeqCst));
    assert_eq!(h.router.status().await.stats.fallback_count, 0);
}

#[tokio::test]
async fn test_execute_without_fallback_is_rejected() {
    let h = Harness::both_up().await;

    let err = h
        .router
        .execute::<String>(
            Operation::EvaluateAnswer,
            Call::new(ProviderId::Local, async { Ok("   ".to_string()) }),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.rejection(), Some(&Rejection::EmptyResult));
}

#[tokio::test]
async fn test_concurrent_operations_count_every_request() {
    let h = Harness::both_up().await;
    let ctx = Arc::new(context());

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let router = Arc::clone(&h.router);
            let ctx = Arc::clone(&ctx);
            tokio::spawn(async move { router.generate_first_question(&ctx).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stats = h.router.status().await.stats;
    assert_eq!(stats.requests(ProviderId::Local), 32);
    assert_eq!(h.local.calls(), 32);
}
