//! Image generation options and results.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Aspect ratio of a generated image.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::IntoStaticStr,
    derive_more::Display,
)]
pub enum AspectRatio {
    /// Square feed post
    #[default]
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    #[display("1:1")]
    Square,
    /// Portrait feed post
    #[serde(rename = "3:4")]
    #[strum(serialize = "3:4")]
    #[display("3:4")]
    Portrait3x4,
    /// Stories and reels
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    #[display("9:16")]
    Portrait9x16,
    /// Landscape
    #[serde(rename = "4:3")]
    #[strum(serialize = "4:3")]
    #[display("4:3")]
    Landscape4x3,
    /// Widescreen
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    #[display("16:9")]
    Landscape16x9,
}

impl AspectRatio {
    /// Wire representation expected by the image endpoint.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Requested output resolution.
///
/// `2K` and `4K` are only served by the high-resolution model tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::IntoStaticStr,
    derive_more::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum ImageSize {
    /// Standard resolution
    #[default]
    #[serde(rename = "1K")]
    #[strum(serialize = "1K")]
    #[display("1K")]
    Size1K,
    /// 2K resolution
    #[serde(rename = "2K")]
    #[strum(serialize = "2K")]
    #[display("2K")]
    Size2K,
    /// 4K resolution
    #[serde(rename = "4K")]
    #[strum(serialize = "4K")]
    #[display("4K")]
    Size4K,
}

impl ImageSize {
    /// Wire representation expected by the image endpoint.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// True for sizes that need the high-resolution tier.
    pub fn is_high_resolution(&self) -> bool {
        matches!(self, ImageSize::Size2K | ImageSize::Size4K)
    }
}

/// Image bytes returned by the image endpoint.
///
/// # Examples
///
/// ```
/// use postsmith_core::GeneratedImage;
///
/// let image = GeneratedImage {
///     mime_type: "image/png".to_string(),
///     data: vec![0x89, b'P', b'N', b'G'],
///     model: "gemini-2.5-flash-image".to_string(),
/// };
/// assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw==");
/// assert_eq!(image.extension(), "png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// MIME type reported by the endpoint
    pub mime_type: String,
    /// Decoded image bytes
    pub data: Vec<u8>,
    /// Model that produced the image
    pub model: String,
}

impl GeneratedImage {
    /// Render the image as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_round_trips_through_from_str() {
        for ratio in [
            AspectRatio::Square,
            AspectRatio::Portrait3x4,
            AspectRatio::Portrait9x16,
            AspectRatio::Landscape4x3,
            AspectRatio::Landscape16x9,
        ] {
            assert_eq!(ratio.as_str().parse::<AspectRatio>(), Ok(ratio));
            assert_eq!(ratio.to_string(), ratio.as_str());
        }
    }

    #[test]
    fn only_2k_and_4k_are_high_resolution() {
        assert!(!ImageSize::Size1K.is_high_resolution());
        assert!(ImageSize::Size2K.is_high_resolution());
        assert!(ImageSize::Size4K.is_high_resolution());
    }

    #[test]
    fn image_size_parses_case_insensitively() {
        assert_eq!("4k".parse::<ImageSize>(), Ok(ImageSize::Size4K));
        assert_eq!(ImageSize::Size2K.as_str(), "2K");
        assert!("8K".parse::<ImageSize>().is_err());
        assert!("2:1".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&(AspectRatio::Portrait9x16, ImageSize::Size2K)).unwrap();
        assert_eq!(json, r#"["9:16","2K"]"#);
    }
}
