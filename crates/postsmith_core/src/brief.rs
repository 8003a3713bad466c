//! The user's description of the post to generate.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What the user wants a post about, and for whom.
///
/// The brief is sent to the text model verbatim as JSON.
///
/// # Examples
///
/// ```
/// use postsmith_core::PostBrief;
///
/// let brief = PostBrief::builder()
///     .theme("Morning routines")
///     .niche("Productivity")
///     .audience("Remote workers")
///     .goal("Engagement")
///     .tone("Friendly")
///     .build()
///     .unwrap();
///
/// assert_eq!(brief.theme(), "Morning routines");
/// assert!(brief.to_json().contains("\"niche\":\"Productivity\""));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct PostBrief {
    /// Topic of the post
    theme: String,
    /// Market niche the account serves
    niche: String,
    /// Target audience
    audience: String,
    /// Goal of the post (engagement, sales, awareness, ...)
    goal: String,
    /// Voice of the post
    tone: String,
}

impl PostBrief {
    /// Creates a new brief builder.
    pub fn builder() -> PostBriefBuilder {
        PostBriefBuilder::default()
    }

    /// JSON form sent to the text model.
    pub fn to_json(&self) -> String {
        // Serializing five string fields cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
