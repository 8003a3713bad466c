//! The generation client: one logical request, many remote calls.

use crate::{ContentRequest, ContentResponse, GenerationBackend, SYSTEM_INSTRUCTION};
use postsmith_core::{
    AspectRatio, Capability, GeneratedImage, GeneratedPost, GenerationRequest, ImageSize, PostBrief,
};
use postsmith_error::{GenerationError, GenerationErrorKind};
use postsmith_retry::{
    AttemptOutcome, Backoff, FailureClass, ModelTier, PostsmithConfig, RetryState, TierSelector,
};
use tracing::{debug, info, instrument, warn};

/// A usable payload returned by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Non-empty generated text
    Text(String),
    /// Decoded inline image
    Image(GeneratedImage),
}

/// A successful result plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    /// The result itself
    pub value: T,
    /// Tier that produced the result
    pub tier: ModelTier,
    /// Model id that produced the result
    pub model: String,
    /// Network calls made, including retries and any fallback
    pub network_attempts: u32,
    /// Whether the request fell back to a lower tier
    pub downgraded: bool,
}

impl<T> Generated<T> {
    /// Transform the value, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generated<U> {
        Generated {
            value: f(self.value),
            tier: self.tier,
            model: self.model,
            network_attempts: self.network_attempts,
            downgraded: self.downgraded,
        }
    }
}

/// Runs generation requests against a backend with retry and tier fallback.
///
/// Per request:
///
/// - a rate-limited call is charged to the attempt budget and retried at the
///   same tier after a [`Backoff`] delay, until the budget runs out
/// - a permission failure at [`ModelTier::Pro`] triggers one retry at
///   [`ModelTier::Standard`] that does not consume the budget; if that fails
///   too (including with an unusable payload), the original permission error
///   is returned
/// - every other failure, and any unusable payload, ends the request at once
///
/// The client holds no per-request state, so a single instance can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct GenerationClient<B> {
    backend: B,
    selector: TierSelector,
    backoff: Backoff,
    max_attempts: u32,
}

impl<B: GenerationBackend> GenerationClient<B> {
    /// Creates a client with retry and model settings from `config`.
    pub fn new(backend: B, config: &PostsmithConfig) -> Self {
        Self::with_parts(
            backend,
            TierSelector::new(config.models.clone()),
            Backoff::from_millis(config.retry.base_delay_ms),
            config.retry.max_attempts,
        )
    }

    /// Creates a client from explicit components.
    pub fn with_parts(
        backend: B,
        selector: TierSelector,
        backoff: Backoff,
        max_attempts: u32,
    ) -> Self {
        Self {
            backend,
            selector,
            backoff,
            max_attempts,
        }
    }

    /// The backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one logical request to completion.
    ///
    /// # Errors
    ///
    /// - [`GenerationErrorKind::RateLimited`] once the attempt budget is spent
    /// - [`GenerationErrorKind::PermissionDenied`] when no lower tier is left
    ///   or the fallback attempt also failed
    /// - [`GenerationErrorKind::Remote`] for any other remote failure
    /// - [`GenerationErrorKind::MalformedResponse`] when the call succeeded but
    ///   returned no usable text or image
    #[instrument(
        skip(self, request),
        fields(provider = self.backend.provider_name(), capability = ?request.capability())
    )]
    pub async fn execute(
        &self,
        request: &GenerationRequest,
    ) -> Result<Generated<Payload>, GenerationError> {
        let capability = request.capability();
        let mut state = RetryState::new(self.max_attempts, self.selector.initial_tier(capability));
        debug!(tier = %state.tier(), max_attempts = self.max_attempts, "Starting generation");

        loop {
            let outcome = self.attempt(request, &mut state).await;
            let (class, error) = match outcome {
                AttemptOutcome::Success(response) => return self.finish(response, request, &state),
                AttemptOutcome::Failed { class, error } => (class, error),
            };

            match class {
                FailureClass::RateLimited { suggested_wait_secs } => {
                    if !state.record_rate_limit() {
                        warn!(
                            attempts = state.network_calls(),
                            "Rate limit persisted, giving up"
                        );
                        return Err(GenerationError::new(GenerationErrorKind::RateLimited {
                            message: error.message,
                            attempts: state.network_calls(),
                        }));
                    }
                    warn!(
                        remaining = state.attempts_remaining(),
                        error = %error,
                        "Rate limited, retrying at the same tier"
                    );
                    self.backoff
                        .wait(state.retries() - 1, suggested_wait_secs)
                        .await;
                }
                FailureClass::PermissionDenied => {
                    let Some(lower) = state.downgrade() else {
                        warn!(tier = %state.tier(), error = %error, "Permission denied, no fallback");
                        return Err(GenerationError::new(GenerationErrorKind::PermissionDenied {
                            message: error.message,
                            fallback: None,
                        }));
                    };
                    warn!(tier = %lower, error = %error, "Permission denied, downgrading tier");

                    // An unusable fallback payload counts as a failed fallback
                    let fallback = match self.attempt(request, &mut state).await {
                        AttemptOutcome::Success(response) => {
                            match self.finish(response, request, &state) {
                                Ok(generated) => return Ok(generated),
                                Err(unusable) => unusable.message().to_string(),
                            }
                        }
                        AttemptOutcome::Failed {
                            error: fallback, ..
                        } => fallback.message,
                    };
                    warn!(fallback = %fallback, "Fallback attempt failed");
                    return Err(GenerationError::new(GenerationErrorKind::PermissionDenied {
                        message: error.message,
                        fallback: Some(fallback),
                    }));
                }
                FailureClass::Other { .. } => {
                    warn!(error = %error, "Remote call failed, not retrying");
                    return Err(GenerationError::new(GenerationErrorKind::Remote {
                        status: error.status,
                        message: error.message,
                    }));
                }
            }
        }
    }

    /// Generate a structured post from a brief.
    #[instrument(skip(self, brief), fields(theme = %brief.theme()))]
    pub async fn generate_post(
        &self,
        brief: &PostBrief,
    ) -> Result<Generated<GeneratedPost>, GenerationError> {
        let request = GenerationRequest::text(brief.to_json(), SYSTEM_INSTRUCTION);
        let generated = self.execute(&request).await?;

        let Payload::Text(text) = &generated.value else {
            return Err(malformed("Expected text from the text model"));
        };
        let post: GeneratedPost = serde_json::from_str(text.trim()).map_err(|e| {
            warn!(error = %e, "Generated text is not a valid post");
            malformed(format!("Generated text is not a valid post: {}", e))
        })?;

        info!(
            model = %generated.model,
            attempts = generated.network_attempts,
            "Post generated"
        );
        Ok(generated.map(|_| post))
    }

    /// Generate an image for `prompt`.
    ///
    /// `2K` and `4K` start at the pro image model and may fall back to the
    /// standard model (which ignores the requested size).
    #[instrument(skip(self, prompt))]
    pub async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        size: ImageSize,
    ) -> Result<Generated<GeneratedImage>, GenerationError> {
        let request = GenerationRequest::image(prompt, aspect_ratio, size);
        let generated = self.execute(&request).await?;

        match generated.value {
            Payload::Image(image) => {
                info!(
                    model = %generated.model,
                    downgraded = generated.downgraded,
                    bytes = image.data.len(),
                    "Image generated"
                );
                Ok(Generated {
                    value: image,
                    tier: generated.tier,
                    model: generated.model,
                    network_attempts: generated.network_attempts,
                    downgraded: generated.downgraded,
                })
            }
            Payload::Text(_) => Err(malformed("Expected an image from the image model")),
        }
    }

    /// One network call at the state's current tier.
    async fn attempt(
        &self,
        request: &GenerationRequest,
        state: &mut RetryState,
    ) -> AttemptOutcome<ContentResponse> {
        let model = self.selector.model_for(request.capability(), state.tier());
        let body = ContentRequest::for_request(request, state.tier());
        state.record_call();
        debug!(model, call = state.network_calls(), "Calling backend");
        AttemptOutcome::from(self.backend.generate_content(model, &body).await)
    }

    /// Turn a successful response into a usable payload.
    fn finish(
        &self,
        response: ContentResponse,
        request: &GenerationRequest,
        state: &RetryState,
    ) -> Result<Generated<Payload>, GenerationError> {
        let model = self.selector.model_for(request.capability(), state.tier());
        let value = match request.capability() {
            Capability::Text => response.text().map(Payload::Text).ok_or_else(|| {
                malformed(empty_message("No text returned by the model", &response))
            })?,
            Capability::Image { .. } => response
                .first_image(model)
                .map_err(malformed)?
                .map(Payload::Image)
                .ok_or_else(|| {
                    malformed(empty_message("No image data found in the response", &response))
                })?,
        };

        debug!(model, tier = %state.tier(), calls = state.network_calls(), "Generation succeeded");
        Ok(Generated {
            value,
            tier: state.tier(),
            model: model.to_string(),
            network_attempts: state.network_calls(),
            downgraded: state.downgraded(),
        })
    }
}

#[track_caller]
fn malformed(message: impl Into<String>) -> GenerationError {
    GenerationError::new(GenerationErrorKind::MalformedResponse(message.into()))
}

fn empty_message(base: &str, response: &ContentResponse) -> String {
    match response.block_reason() {
        Some(reason) => format!("{} ({})", base, reason),
        None => base.to_string(),
    }
}
