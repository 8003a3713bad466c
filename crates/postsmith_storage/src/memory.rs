//! In-memory implementation of PostRepository.
//!
//! Records live in a Vec behind an RwLock and are lost when the repository
//! is dropped.

use crate::PostRepository;
use crate::repository::newest_first;
use async_trait::async_trait;
use postsmith_core::{GeneratedPost, SavedPost};
use postsmith_error::{PostsmithResult, StorageError, StorageErrorKind};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory repository for saved posts.
///
/// Clones share the same records.
///
/// # Example
/// ```
/// use postsmith_storage::{InMemoryPostRepository, PostRepository};
///
/// # #[tokio::main]
/// # async fn main() -> postsmith_error::PostsmithResult<()> {
/// let repo = InMemoryPostRepository::new();
/// assert!(repo.list("ana").await?.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPostRepository {
    records: Arc<RwLock<Vec<SavedPost>>>,
}

impl InMemoryPostRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records across all owners.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save(
        &self,
        owner: &str,
        topic: &str,
        content: &GeneratedPost,
    ) -> PostsmithResult<SavedPost> {
        let record = SavedPost::new(owner, topic, content.clone());
        self.records.write().await.push(record.clone());
        tracing::debug!(id = %record.id, owner, "Saved post in memory");
        Ok(record)
    }

    async fn list(&self, owner: &str) -> PostsmithResult<Vec<SavedPost>> {
        Ok(newest_first(&self.records.read().await, owner))
    }

    async fn get(&self, id: Uuid) -> PostsmithResult<SavedPost> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())).into())
    }

    async fn update(&self, id: Uuid, content: &GeneratedPost) -> PostsmithResult<SavedPost> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())))?;
        record.content = content.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> PostsmithResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StorageError::new(StorageErrorKind::NotFound(id.to_string())).into());
        }
        Ok(())
    }
}
