//! Generated post content.

use crate::{AspectRatio, ImageSize};
use serde::{Deserialize, Serialize};

/// Alternate takes on the caption.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostVariations {
    /// Condensed caption
    pub short_version: String,
    /// Humorous caption
    pub funny_version: String,
}

/// Image settings remembered alongside a saved post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageOptions {
    /// Aspect ratio the image was (or will be) rendered at
    pub aspect_ratio: AspectRatio,
    /// Resolution the image was (or will be) rendered at
    pub size: ImageSize,
}

/// A complete post as returned by the text model.
///
/// Field names match the response schema sent to the model, so the model's
/// JSON deserializes directly into this type.
///
/// # Examples
///
/// ```
/// use postsmith_core::GeneratedPost;
///
/// let json = r##"{
///     "title": "Five-minute mornings",
///     "title_variations": ["Mornings, faster"],
///     "caption": "Start strong.",
///     "hashtags": ["#productivity"],
///     "visual_prompt": "A sunrise over a desk",
///     "variations": {"short_version": "Start.", "funny_version": "Coffee first."}
/// }"##;
/// let post: GeneratedPost = serde_json::from_str(json).unwrap();
/// assert_eq!(post.hashtags, vec!["#productivity"]);
/// assert!(post.image_options.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    /// Headline
    pub title: String,
    /// Alternative headlines
    #[serde(default)]
    pub title_variations: Vec<String>,
    /// Caption body with hook, development and call to action
    pub caption: String,
    /// Niche-specific hashtags
    pub hashtags: Vec<String>,
    /// Prompt describing the image to render
    pub visual_prompt: String,
    /// Caption variations
    pub variations: PostVariations,
    /// Image settings chosen by the user, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_options: Option<ImageOptions>,
}

impl GeneratedPost {
    /// Hashtags joined into a single line, ready to paste.
    pub fn hashtag_line(&self) -> String {
        self.hashtags.join(" ")
    }
}
