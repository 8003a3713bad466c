//! The seam between the generation client and the remote service.

use crate::{ContentRequest, ContentResponse};
use async_trait::async_trait;
use postsmith_error::RemoteError;

/// A generative-AI endpoint the [`GenerationClient`](crate::GenerationClient)
/// can call.
///
/// Implementations make exactly one network call per invocation and never
/// retry on their own; retry policy belongs to the client.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Send `request` to `model` and return the raw response envelope.
    async fn generate_content(
        &self,
        model: &str,
        request: &ContentRequest,
    ) -> Result<ContentResponse, RemoteError>;

    /// Provider name for logs (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}
