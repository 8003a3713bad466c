//! Repository trait for saved posts.

use async_trait::async_trait;
use postsmith_core::{GeneratedPost, SavedPost};
use postsmith_error::PostsmithResult;
use uuid::Uuid;

/// Storage for a user's generated post history.
///
/// Records are keyed by a generated [`Uuid`]. Ownership is recorded on save;
/// callers that act on behalf of a user check [`SavedPost::owner`] before
/// showing or removing a record.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Save `content` for `owner` and return the stored record.
    async fn save(
        &self,
        owner: &str,
        topic: &str,
        content: &GeneratedPost,
    ) -> PostsmithResult<SavedPost>;

    /// All records belonging to `owner`, newest first.
    async fn list(&self, owner: &str) -> PostsmithResult<Vec<SavedPost>>;

    /// Load a single record.
    ///
    /// # Errors
    ///
    /// `StorageErrorKind::NotFound` if no record has this id.
    async fn get(&self, id: Uuid) -> PostsmithResult<SavedPost>;

    /// Replace the content of an existing record, returning the updated record.
    async fn update(&self, id: Uuid, content: &GeneratedPost) -> PostsmithResult<SavedPost>;

    /// Remove a record.
    async fn delete(&self, id: Uuid) -> PostsmithResult<()>;
}

/// Records owned by `owner`, newest first.
///
/// Records sharing a timestamp keep reverse insertion order.
pub(crate) fn newest_first(records: &[SavedPost], owner: &str) -> Vec<SavedPost> {
    let mut owned: Vec<SavedPost> = records
        .iter()
        .rev()
        .filter(|r| r.owner == owner)
        .cloned()
        .collect();
    owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    owned
}
