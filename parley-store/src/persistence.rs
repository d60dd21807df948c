//! File persistence helpers.
//!
//! Settings may sit next to an API key in the user's shell setup, so every
//! file written here is owner-only on Unix.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/.config/parley`
/// - Linux: `$XDG_CONFIG_HOME/parley` (usually `~/.config/parley`)
/// - Windows: `%APPDATA%\parley`
pub fn default_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map(|h| h.join(".config").join("parley"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir()
            .map(|c| c.join("parley"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

// ============================================================================
// Security: File Permissions
// ============================================================================

#[cfg(unix)]
async fn set_mode(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = tokio::fs::metadata(path).await?.permissions();
    perms.set_mode(mode);
    tokio::fs::set_permissions(path, perms).await?;
    debug!(path = %path.display(), mode = format!("{mode:o}"), "Set permissions");
    Ok(())
}

#[cfg(not(unix))]
async fn set_mode(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Creates the parent directory (0700 on Unix) if it is missing.
async fn create_parent_dir(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !tokio::fs::try_exists(parent).await? {
            debug!(path = %parent.display(), "Creating directory");
            tokio::fs::create_dir_all(parent).await?;
            set_mode(parent, 0o700).await?;
        }
    }
    Ok(())
}

/// Saves data as pretty JSON.
///
/// Writes to a sibling temp file with mode 0600 and renames it over the
/// target, so readers never observe a partial file.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    create_parent_dir(path).await?;
    let json = serde_json::to_string_pretty(data)?;

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, json.as_bytes()).await?;
    set_mode(&temp_path, 0o600).await?;
    tokio::fs::rename(&temp_path, path).await?;

    debug!(path = %path.display(), "JSON file saved");
    Ok(())
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Loads data from a JSON file, returning the default if it is missing or
/// unreadable.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(data) => data,
        Err(e) => {
            if !e.is_not_found() {
                warn!(path = %path.display(), error = %e, "Failed to load, using defaults");
            }
            T::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_default_settings_path() {
        let path = default_settings_path();
        assert!(path.ends_with("parley/settings.json"));
    }

    #[tokio::test]
    async fn test_save_creates_parent_and_replaces_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let mut data = BTreeMap::new();
        data.insert("a".to_string(), 1);
        save_json(&path, &data).await.unwrap();
        data.insert("b".to_string(), 2);
        save_json(&path, &data).await.unwrap();

        let loaded: BTreeMap<String, i32> = load_json(&path).await.unwrap();
        assert_eq!(loaded, data);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        save_json(&path, &serde_json::json!({})).await.unwrap();

        let file_mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);
        let dir_mode = std::fs::metadata(path.parent().unwrap())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[tokio::test]
    async fn test_load_or_default_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let loaded: BTreeMap<String, i32> = load_json_or_default(&path).await;
        assert!(loaded.is_empty());

        let missing: BTreeMap<String, i32> =
            load_json_or_default(&dir.path().join("missing.json")).await;
        assert!(missing.is_empty());
    }
}
