//! Settings file round-trips through the filesystem.

use parley_core::ProviderId;
use parley_store::{Settings, StoreError};

#[tokio::test]
async fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_file(&dir.path().join("settings.json"))
        .await
        .unwrap();
    assert_eq!(settings, Settings::default());
}

#[tokio::test]
async fn test_invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    tokio::fs::write(&path, "{ routing: ").await.unwrap();

    let err = Settings::load_file(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
}

#[tokio::test]
async fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parley").join("settings.json");

    let mut settings = Settings::default();
    settings.routing.primary = ProviderId::Cloud;
    settings.local.model = "qwen2:7b".into();
    settings.cloud.api_key = Some("do-not-write".into());
    settings.save(&path).await.unwrap();

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(!raw.contains("do-not-write"));

    let loaded = Settings::load_file(&path).await.unwrap();
    assert_eq!(loaded.routing.primary, ProviderId::Cloud);
    assert_eq!(loaded.local.model, "qwen2:7b");
    assert!(loaded.cloud.api_key.is_none());
}

#[tokio::test]
async fn test_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    Settings::init(&path, false).await.unwrap();
    let err = Settings::init(&path, false).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(_)));

    Settings::init(&path, true).await.unwrap();
}

#[tokio::test]
async fn test_file_then_env_layering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    tokio::fs::write(
        &path,
        r#"{"routing": {"primary": "cloud", "fallback_enabled": false}, "local": {"model": "phi3:mini"}}"#,
    )
    .await
    .unwrap();

    let mut settings = Settings::load_file(&path).await.unwrap();
    settings
        .apply_env(|name| (name == "PARLEY_FALLBACK").then(|| "true".to_string()))
        .unwrap();

    assert_eq!(settings.routing.primary, ProviderId::Cloud);
    assert!(settings.routing.fallback_enabled);
    assert_eq!(settings.local.model, "phi3:mini");
}
