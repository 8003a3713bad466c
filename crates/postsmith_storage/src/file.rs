//! JSON file implementation of PostRepository.

use crate::PostRepository;
use crate::repository::newest_first;
use async_trait::async_trait;
use postsmith_core::{GeneratedPost, SavedPost};
use postsmith_error::{PostsmithResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Saved posts persisted to a single JSON file.
///
/// The file holds a JSON array of records. Every mutation rewrites the whole
/// file through a temp file and rename, so a crash never leaves a half-written
/// history behind. A missing file reads as an empty history.
///
/// Writes are serialized within one process only; two processes sharing a
/// history file can lose each other's updates.
#[derive(Debug)]
pub struct FilePostRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePostRepository {
    /// Open (or lazily create) the history file at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory cannot be created.
    #[tracing::instrument(skip(path))]
    pub fn new(path: impl Into<PathBuf>) -> PostsmithResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
        tracing::debug!(path = %path.display(), "Opened history file");
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Location of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> PostsmithResult<Vec<SavedPost>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
            .into()
        })
    }

    async fn store(&self, records: &[SavedPost]) -> PostsmithResult<()> {
        let json = serde_json::to_vec_pretty(records).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "serialize history: {}",
                e
            )))
        })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for FilePostRepository {
    #[tracing::instrument(skip(self, content))]
    async fn save(
        &self,
        owner: &str,
        topic: &str,
        content: &GeneratedPost,
    ) -> PostsmithResult<SavedPost> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let record = SavedPost::new(owner, topic, content.clone());
        records.push(record.clone());
        self.store(&records).await?;

        tracing::info!(id = %record.id, path = %self.path.display(), "Saved post");
        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, owner: &str) -> PostsmithResult<Vec<SavedPost>> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(newest_first(&records, owner))
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: Uuid) -> PostsmithResult<SavedPost> {
        let _guard = self.lock.lock().await;
        self.load()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())).into())
    }

    #[tracing::instrument(skip(self, content))]
    async fn update(&self, id: Uuid, content: &GeneratedPost) -> PostsmithResult<SavedPost> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())))?;
        record.content = content.clone();
        let updated = record.clone();
        self.store(&records).await?;

        tracing::info!(id = %id, "Updated saved post");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> PostsmithResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StorageError::new(StorageErrorKind::NotFound(id.to_string())).into());
        }
        self.store(&records).await?;

        tracing::info!(id = %id, "Deleted saved post");
        Ok(())
    }
}
