//! Mock generation backend for testing.

use async_trait::async_trait;
use postsmith_error::RemoteError;
use postsmith_models::{
    Candidate, Content, ContentRequest, ContentResponse, GenerationBackend, InlineData, Part,
};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// A single scripted reply (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(ContentResponse),
    Error(RemoteError),
}

/// One call the backend received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub request: ContentRequest,
    pub at: Instant,
}

/// Mock backend that replays a fixed sequence of replies.
///
/// Calls beyond the end of the script fail with a non-retryable error so a
/// runaway retry loop shows up as a test failure rather than a hang.
#[derive(Debug, Clone)]
pub struct MockBackend {
    script: Arc<Vec<MockResponse>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBackend {
    /// Create a mock backend with a sequence of replies.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            script: Arc::new(responses),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock backend that succeeds once with `response`.
    pub fn new_success(response: ContentResponse) -> Self {
        Self::new_sequence(vec![MockResponse::Success(response)])
    }

    /// Get the number of times generate_content() was called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Models targeted, in call order.
    pub fn models(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }

    /// Time between consecutive calls, in milliseconds.
    pub fn gaps_ms(&self) -> Vec<u128> {
        self.calls()
            .windows(2)
            .map(|w| (w[1].at - w[0].at).as_millis())
            .collect()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate_content(
        &self,
        model: &str,
        request: &ContentRequest,
    ) -> Result<ContentResponse, RemoteError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                model: model.to_string(),
                request: request.clone(),
                at: Instant::now(),
            });
            calls.len() - 1
        };

        match self.script.get(index) {
            Some(MockResponse::Success(response)) => Ok(response.clone()),
            Some(MockResponse::Error(error)) => Err(error.clone()),
            None => Err(RemoteError::with_status(
                500,
                format!("mock script exhausted at call {}", index + 1),
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A response whose first candidate holds `text`.
pub fn text_response(text: &str) -> ContentResponse {
    ContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part::text(text)],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
        prompt_feedback: None,
    }
}

/// A response whose first candidate holds a base64 PNG payload.
pub fn image_response(base64_data: &str) -> ContentResponse {
    ContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: "image/png".to_string(),
                        data: base64_data.to_string(),
                    }),
                }],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
        prompt_feedback: None,
    }
}

/// A 429 in the shape the Gemini API returns it.
pub fn rate_limited(message: &str) -> MockResponse {
    MockResponse::Error(RemoteError::with_status(429, message).status_text("RESOURCE_EXHAUSTED"))
}

/// A 403 in the shape the Gemini API returns it.
pub fn permission_denied(message: &str) -> MockResponse {
    MockResponse::Error(RemoteError::with_status(403, message).status_text("PERMISSION_DENIED"))
}
