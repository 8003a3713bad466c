//! Core data types for Postsmith.
//!
//! This crate holds the domain types shared by the generation client, the
//! history store and the command-line front end.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod image;
mod post;
mod request;
mod saved;

pub use brief::{PostBrief, PostBriefBuilder, PostBriefBuilderError};
pub use image::{AspectRatio, GeneratedImage, ImageSize};
pub use post::{GeneratedPost, ImageOptions, PostVariations};
pub use request::{
    Capability, GenerationRequest, GenerationRequestBuilder, GenerationRequestBuilderError,
};
pub use saved::SavedPost;
