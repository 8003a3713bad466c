//! Wire types for the Gemini `generateContent` REST endpoint.
//!
//! Only the fields Postsmith reads or writes are modeled. Everything is
//! camelCase on the wire.

use crate::{SYSTEM_INSTRUCTION, post_response_schema};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use postsmith_core::{Capability, GeneratedImage, GenerationRequest};
use postsmith_retry::ModelTier;
use serde::{Deserialize, Serialize};

/// Mime type assumed when the provider omits one for inline image data.
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    /// Conversation turns; Postsmith always sends exactly one
    pub contents: Vec<Content>,
    /// System instruction for text generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Output shaping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl ContentRequest {
    /// Build the wire request for `request` at the given tier.
    ///
    /// Text requests ask for JSON matching the post schema. Image requests
    /// carry the aspect ratio, and the image size only at [`ModelTier::Pro`]
    /// since the standard image model rejects it.
    pub fn for_request(request: &GenerationRequest, tier: ModelTier) -> Self {
        match request.capability() {
            Capability::Text => {
                let instruction = request
                    .system_instruction()
                    .clone()
                    .unwrap_or_else(|| SYSTEM_INSTRUCTION.to_string());
                Self {
                    contents: vec![Content::user_text(request.prompt())],
                    system_instruction: Some(Content::text(instruction)),
                    generation_config: Some(GenerationConfig {
                        response_mime_type: Some("application/json".to_string()),
                        response_schema: Some(post_response_schema()),
                        image_config: None,
                    }),
                }
            }
            Capability::Image { aspect_ratio, size } => {
                let image_size = match tier {
                    ModelTier::Pro => Some(size.as_str().to_string()),
                    ModelTier::Standard => None,
                };
                Self {
                    contents: vec![Content::text(request.prompt())],
                    system_instruction: request.system_instruction().as_deref().map(Content::text),
                    generation_config: Some(GenerationConfig {
                        response_mime_type: None,
                        response_schema: None,
                        image_config: Some(ImageConfig {
                            aspect_ratio: aspect_ratio.as_str().to_string(),
                            image_size,
                        }),
                    }),
                }
            }
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// "user" or "model"; omitted for system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A role-less content block holding a single text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// A user turn holding a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }
}

/// A piece of content: text or inline binary data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64-encoded binary content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Inline binary data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Mime type (e.g., "image/png")
    #[serde(default)]
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

/// Output shaping options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested response mime type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// JSON schema the response must follow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    /// Image generation options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Image generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Aspect ratio such as "16:9"
    pub aspect_ratio: String,
    /// "1K", "2K" or "4K"; only honored by the pro image model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
}

/// Response envelope of a successful call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    /// Generated candidates; Postsmith reads the first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Safety feedback when the prompt itself was blocked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl ContentResponse {
    /// Concatenated text of the first candidate, if it has any text.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }

    /// The first inline data part of the first candidate, decoded.
    ///
    /// Returns `Ok(None)` when there is no inline data at all and `Err` when
    /// the payload is not valid base64.
    pub fn first_image(&self, model: &str) -> Result<Option<GeneratedImage>, String> {
        let Some(inline) = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.iter().find_map(|p| p.inline_data.as_ref()))
        else {
            return Ok(None);
        };

        let data = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| format!("Image data is not valid base64: {}", e))?;
        let mime_type = if inline.mime_type.is_empty() {
            DEFAULT_IMAGE_MIME.to_string()
        } else {
            inline.mime_type.clone()
        };
        Ok(Some(GeneratedImage {
            mime_type,
            data,
            model: model.to_string(),
        }))
    }

    /// Why the response carries no content, if the provider said.
    pub fn block_reason(&self) -> Option<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Some(reason);
        }
        self.candidates.first().and_then(|c| c.finish_reason.clone())
    }
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped (e.g., "STOP", "SAFETY")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Prompt-level safety feedback.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Block reason, if the prompt was blocked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error
    pub error: ErrorBody,
}

/// Provider error details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Numeric code, normally the HTTP status
    #[serde(default)]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Status string such as "RESOURCE_EXHAUSTED"
    #[serde(default)]
    pub status: Option<String>,
}
