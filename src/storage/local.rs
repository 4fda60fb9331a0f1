//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── current.json          # Replace: overwritten by every save
//! └── history/              # History: append-only, newest wins
//!     └── {timestamp}.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{MarsDocument, PersistencePolicy};
use crate::storage::{SnapshotStore, WriteMetadata};

const CURRENT_KEY: &str = "current.json";
const HISTORY_DIR: &str = "history";

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    policy: PersistencePolicy,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, policy: PersistencePolicy) -> Self {
        Self {
            root_dir: root_dir.into(),
            policy,
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// History key for a capture time.
    fn history_key(timestamp: DateTime<Utc>) -> String {
        format!(
            "{}/{}.json",
            HISTORY_DIR,
            timestamp.format("%Y%m%dT%H%M%S%.6fZ")
        )
    }

    /// Every document in the history directory.
    async fn load_history(&self) -> Result<Vec<MarsDocument>> {
        let dir = self.path(HISTORY_DIR);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.ends_with(".json") {
                continue;
            }
            let key = format!("{HISTORY_DIR}/{name}");
            if let Some(doc) = self.read_json::<MarsDocument>(&key).await? {
                documents.push(doc);
            }
        }
        Ok(documents)
    }
}

#[async_trait]
impl SnapshotStore for LocalStorage {
    async fn save(&self, document: &MarsDocument) -> Result<WriteMetadata> {
        let key = match self.policy {
            PersistencePolicy::Replace => CURRENT_KEY.to_string(),
            PersistencePolicy::History => Self::history_key(document.last_modified),
        };

        self.write_json(&key, document).await?;
        log::info!("Snapshot written to {}", self.path(&key).display());

        Ok(WriteMetadata {
            location: key,
            policy: self.policy,
            timestamp: Utc::now(),
        })
    }

    async fn load_current(&self) -> Result<Option<MarsDocument>> {
        match self.policy {
            PersistencePolicy::Replace => {
                let current = self.read_json(CURRENT_KEY).await?;
                if current.is_none() {
                    log::warn!("No {} found", CURRENT_KEY);
                }
                Ok(current)
            }
            PersistencePolicy::History => Ok(self
                .load_history()
                .await?
                .into_iter()
                .max_by_key(|doc| doc.last_modified)),
        }
    }
}
