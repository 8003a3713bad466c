//! Logical generation requests.

use crate::{AspectRatio, ImageSize};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What kind of output a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Structured text (a [`GeneratedPost`](crate::GeneratedPost))
    Text,
    /// A rendered image
    Image {
        /// Requested aspect ratio
        aspect_ratio: AspectRatio,
        /// Requested resolution
        size: ImageSize,
    },
}

impl Capability {
    /// True for image requests at `2K` or `4K`.
    pub fn is_high_resolution(&self) -> bool {
        match self {
            Capability::Text => false,
            Capability::Image { size, .. } => size.is_high_resolution(),
        }
    }
}

/// A single logical request to the generative-AI service.
///
/// Immutable once built; retries and tier downgrades reuse the same request.
///
/// # Examples
///
/// ```
/// use postsmith_core::{AspectRatio, Capability, GenerationRequest, ImageSize};
///
/// let request = GenerationRequest::image("A cat on a skateboard", AspectRatio::Square, ImageSize::Size4K);
/// assert!(request.capability().is_high_resolution());
/// assert!(request.system_instruction().is_none());
///
/// let text = GenerationRequest::builder()
///     .prompt("{\"theme\":\"coffee\"}")
///     .system_instruction(Some("Answer in JSON".to_string()))
///     .capability(Capability::Text)
///     .build()
///     .unwrap();
/// assert_eq!(*text.capability(), Capability::Text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
pub struct GenerationRequest {
    /// Prompt or serialized structured input
    #[builder(setter(into))]
    prompt: String,
    /// System instruction for text requests
    #[builder(default)]
    system_instruction: Option<String>,
    /// Target capability
    capability: Capability,
}

impl GenerationRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// A structured text request with a system instruction.
    pub fn text(prompt: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: Some(system_instruction.into()),
            capability: Capability::Text,
        }
    }

    /// An image request.
    pub fn image(prompt: impl Into<String>, aspect_ratio: AspectRatio, size: ImageSize) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            capability: Capability::Image { aspect_ratio, size },
        }
    }
}
