//! Router over the real providers, with a mock local server and no cloud key.

use mockito::Server;
use parley_core::{Difficulty, EmptyResultPolicy, ProviderError, ProviderId, ResumeData, Tier};
use parley_providers::{CloudConfig, CloudProvider, LocalConfig, LocalProvider};
use parley_router::{Rejection, Router, RouterConfig, RouterError};
use std::sync::Arc;

async fn router(server: &Server) -> Router {
    router_with(server, RouterConfig::default()).await
}

async fn router_with(server: &Server, config: RouterConfig) -> Router {
    let local = LocalProvider::new(LocalConfig {
        base_url: server.url(),
        ..LocalConfig::default()
    })
    .unwrap();
    let cloud = CloudProvider::new(CloudConfig {
        api_key: None,
        ..CloudConfig::default()
    })
    .unwrap();
    Router::start(Arc::new(local), Arc::new(cloud), config).await
}

async fn mock_local_reply(server: &mut Server, response: &str) {
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[{"name":"llama3.1:8b"}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(serde_json::json!({ "response": response }).to_string())
        .create_async()
        .await;
}

fn resume() -> ResumeData {
    ResumeData {
        skills: vec!["Python".into(), "Django".into()],
        experience_years: 1.0,
        ..ResumeData::default()
    }
}

#[tokio::test]
async fn test_local_serves_when_reachable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[{"name":"llama3.1:8b"}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "response": "{\"primary_domain\": \"backend\", \"technical_depth\": \"beginner\"}"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let router = router(&server).await;
    let routed = router
        .extract_context(&resume(), "Backend Developer", "technical")
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Local);
    assert_eq!(routed.value.domain_analysis.primary_domain, "backend");
    assert!(router.status().await.is_available(ProviderId::Local));
}

#[tokio::test]
async fn test_garbled_local_reply_with_no_cloud_key_uses_defaults() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[{"name":"llama3.1:8b"}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(r#"{"response": "Sorry, I cannot help with that."}"#)
        .create_async()
        .await;

    let router = router(&server).await;
    let routed = router
        .extract_context(&resume(), "Backend Developer", "technical")
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Deterministic);
    assert_eq!(routed.value.domain_analysis.primary_domain, "fullstack");
    assert_eq!(routed.attempts.len(), 2);
}

#[tokio::test]
async fn test_nothing_reachable_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(503)
        .create_async()
        .await;

    let router = router(&server).await;
    let health = router.health().await;
    assert_eq!(health.overall, parley_core::OverallHealth::Unhealthy);

    let err = router
        .extract_context(&resume(), "Backend Developer", "technical")
        .await
        .unwrap_err();

    match err {
        RouterError::Rejected {
            provider,
            rejection: Rejection::Failed(ProviderError::Unavailable(_)),
            ..
        } => assert_eq!(provider, ProviderId::Cloud),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_force_cloud_without_key_fails() {
    let server = Server::new_async().await;
    let router = router(&server).await;

    assert!(!router.force(ProviderId::Cloud).await);
    assert_eq!(router.status().await.preference.primary, ProviderId::Local);
}

#[tokio::test]
async fn test_empty_list_accepted_from_local_when_policy_accepts() {
    let mut server = Server::new_async().await;
    mock_local_reply(&mut server, "[]").await;

    let config = RouterConfig {
        empty_results: EmptyResultPolicy::Accept,
        ..RouterConfig::default()
    };
    let router = router_with(&server, config).await;
    let routed = router
        .generate_aptitude_questions(Difficulty::Hard, 3)
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Local);
    assert!(routed.value.is_empty());
    assert_eq!(routed.attempts.len(), 1);
    assert!(routed.attempts[0].accepted);
}

#[tokio::test]
async fn test_empty_list_from_local_rejected_by_default() {
    let mut server = Server::new_async().await;
    mock_local_reply(&mut server, "[]").await;

    let router = router(&server).await;
    let routed = router
        .generate_aptitude_questions(Difficulty::Hard, 3)
        .await
        .unwrap();

    assert_eq!(routed.served_by, Tier::Deterministic);
    assert_eq!(routed.value.len(), 3);
    assert_eq!(routed.attempts[0].rejection, Some(Rejection::EmptyResult));
}
