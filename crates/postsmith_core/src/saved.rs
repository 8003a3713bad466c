//! Records in the per-user history store.

use crate::GeneratedPost;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated post saved to a user's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPost {
    /// Record identifier
    pub id: Uuid,
    /// User the record belongs to
    pub owner: String,
    /// Topic the user asked for
    pub topic: String,
    /// Generated content, possibly edited after saving
    pub content: GeneratedPost,
    /// When the record was first saved
    pub created_at: DateTime<Utc>,
}

impl SavedPost {
    /// Create a new record stamped with the current time.
    pub fn new(owner: impl Into<String>, topic: impl Into<String>, content: GeneratedPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            topic: topic.into(),
            content,
            created_at: Utc::now(),
        }
    }
}
