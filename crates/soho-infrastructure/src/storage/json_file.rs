//! JSON file repository.
//!
//! Stores the whole inbox as a single versioned JSON document. Older
//! documents (including the bare-array layout) are migrated on
//! load and written back in the current schema.
//!
//! - **Atomic writes**: tmp file + fsync + rename, so readers never observe
//!   a partial snapshot

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use soho_core::error::{Result, SohoError};
use soho_core::thread::{InboxSnapshot, Thread, ThreadRepository};

use crate::migration::{self, CURRENT_VERSION};
use crate::paths::SohoPaths;

pub struct JsonFileThreadRepository {
    path: PathBuf,
}

impl JsonFileThreadRepository {
    /// Creates a repository at the configured path, or the default data
    /// location when `configured` is `None`.
    pub fn new(configured: Option<&str>) -> Result<Self> {
        Ok(Self {
            path: SohoPaths::snapshot_file(configured)?,
        })
    }

    /// Creates a repository backed by an explicit file (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_atomic(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SohoError::io(format!("Failed to create directory: {}", e)))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp_file = fs::File::create(&tmp_path).await.map_err(|e| {
            SohoError::io(format!(
                "Failed to create temp file '{}': {}",
                tmp_path.display(),
                e
            ))
        })?;
        tmp_file.write_all(content.as_bytes()).await.map_err(|e| {
            SohoError::io(format!(
                "Failed to write temp file '{}': {}",
                tmp_path.display(),
                e
            ))
        })?;
        tmp_file
            .sync_all()
            .await
            .map_err(|e| SohoError::io(format!("Failed to sync temp file: {}", e)))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            SohoError::io(format!(
                "Failed to rename temp file '{}' to '{}': {}",
                tmp_path.display(),
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl ThreadRepository for JsonFileThreadRepository {
    async fn load(&self) -> Result<Option<Vec<Thread>>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!(target: "persistence", path = %self.path.display(), "No snapshot file yet");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SohoError::io(format!("Failed to read inbox snapshot: {}", e)))?;
        let raw: serde_json::Value = serde_json::from_str(&content)?;

        let from_version = migration::detect_version(&raw);
        let (snapshot, _) = migration::migrate(raw, &from_version)?;

        if from_version != CURRENT_VERSION {
            info!(
                target: "migration",
                from = %from_version,
                to = CURRENT_VERSION,
                path = %self.path.display(),
                "Upgrading inbox snapshot file"
            );
            if let Err(e) = self.save(&snapshot.threads).await {
                warn!(target: "persistence", error = %e, "Failed to write migrated snapshot");
            }
        }

        Ok(Some(snapshot.threads))
    }

    async fn save(&self, threads: &[Thread]) -> Result<()> {
        let content = migration::to_current(&InboxSnapshot::new(threads.to_vec()))?;
        self.write_atomic(&content).await?;
        debug!(
            target: "persistence",
            path = %self.path.display(),
            threads = threads.len(),
            "Saved inbox snapshot"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_threads;
    use chrono::Utc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_none_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonFileThreadRepository::with_path(temp_dir.path().join("inbox.json"));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonFileThreadRepository::with_path(temp_dir.path().join("nested/inbox.json"));

        let threads = seed_threads(Utc::now());
        repo.save(&threads).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, threads);
        assert!(!temp_dir.path().join("nested/inbox.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_legacy_file_is_upgraded_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inbox.json");
        let legacy = serde_json::json!([{
            "id": "t1",
            "platform": "google",
            "threadTitle": "Great stay",
            "lastUpdated": "2025-04-01T10:00:00.000Z",
            "status": "open",
            "guest": { "name": "Rahul" },
            "messages": [],
            "ai": { "summary": "", "sentiment": "positive", "tags": [], "suggestedReplies": [] },
            "property": { "name": "OceanView Resort" }
        }]);
        std::fs::write(&path, legacy.to_string()).unwrap();

        let repo = JsonFileThreadRepository::with_path(&path);
        let threads = repo.load().await.unwrap().unwrap();
        assert_eq!(threads[0].title, "Great stay");
        assert_eq!(threads[0].guest.as_ref().unwrap().name, "Liza");

        let stored: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored["version"], CURRENT_VERSION);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inbox.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repo = JsonFileThreadRepository::with_path(&path);
        let err = repo.load().await.unwrap_err();
        assert!(err.is_persistence());
    }
}
