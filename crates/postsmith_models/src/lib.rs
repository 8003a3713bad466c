//! Resilient generative-AI client for Postsmith.
//!
//! [`GenerationClient`] turns one logical request (a structured post or an
//! image) into as many remote calls as the retry policy allows:
//!
//! - rate-limited calls are retried at the same tier after a backoff
//! - a permission failure at the high-resolution tier triggers a single
//!   downgrade to the standard tier
//! - anything else is surfaced immediately
//!
//! The remote service sits behind [`GenerationBackend`]; [`GeminiBackend`]
//! talks to the Gemini REST API.
//!
//! # Example
//!
//! ```no_run
//! use postsmith_core::PostBrief;
//! use postsmith_models::{GeminiBackend, GenerationClient};
//! use postsmith_retry::PostsmithConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PostsmithConfig::load()?;
//! let backend = GeminiBackend::from_env(&config.api)?;
//! let client = GenerationClient::new(backend, &config);
//!
//! let brief = PostBrief::builder()
//!     .theme("Cold brew at home")
//!     .niche("Coffee")
//!     .audience("Home baristas")
//!     .goal("Engagement")
//!     .tone("Playful")
//!     .build()?;
//! let post = client.generate_post(&brief).await?;
//! println!("{}", post.value.title);
//! # Ok(())
//! # }
//! ```

mod backend;
mod gemini;
mod generation;
mod prompt;
mod protocol;

pub use backend::GenerationBackend;
pub use gemini::GeminiBackend;
pub use generation::{Generated, GenerationClient, Payload};
pub use prompt::{SYSTEM_INSTRUCTION, post_response_schema};
pub use protocol::{
    Candidate, Content, ContentRequest, ContentResponse, ErrorBody, ErrorEnvelope,
    GenerationConfig, ImageConfig, InlineData, Part, PromptFeedback,
};
