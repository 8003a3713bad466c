//! Gemini REST backend.

use crate::{ContentRequest, ContentResponse, ErrorEnvelope, GenerationBackend};
use async_trait::async_trait;
use postsmith_error::{ConfigError, RemoteError};
use postsmith_retry::ApiConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for `POST {base}/v1beta/models/{model}:generateContent`.
///
/// Makes one HTTP call per [`GenerationBackend::generate_content`] and maps
/// non-2xx responses to [`RemoteError`] using the provider's error envelope.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiBackend {
    /// Creates a backend for the given key and API base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        debug!("Creating new Gemini backend");
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                error!(error = ?e, "Failed to build HTTP client with timeout, using defaults");
                Client::new()
            });
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a backend using `GEMINI_API_KEY` from the environment.
    pub fn from_env(api: &ApiConfig) -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::missing_env(API_KEY_ENV))?;
        Ok(Self::new(api_key, api.base_url.clone()))
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    #[instrument(skip(self, request))]
    async fn generate_content(
        &self,
        model: &str,
        request: &ContentRequest,
    ) -> Result<ContentResponse, RemoteError> {
        debug!("Sending request to Gemini API");

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                RemoteError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Gemini API returned error");
            return Err(parse_error_body(status.as_u16(), &body));
        }

        response.json::<ContentResponse>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            RemoteError::with_status(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Map a non-2xx response body to a [`RemoteError`].
///
/// Prefers the provider's `{"error": {...}}` envelope; falls back to the raw
/// body text so the caller still sees whatever the server said.
pub(crate) fn parse_error_body(status: u16, body: &str) -> RemoteError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = if envelope.error.message.is_empty() {
                format!("HTTP {}", status)
            } else {
                envelope.error.message
            };
            let err = RemoteError::with_status(envelope.error.code.unwrap_or(status), message);
            match envelope.error.status {
                Some(text) => err.status_text(text),
                None => err,
            }
        }
        Err(_) if body.trim().is_empty() => {
            RemoteError::with_status(status, format!("HTTP {}", status))
        }
        Err(_) => RemoteError::with_status(status, body.trim()),
    }
}
