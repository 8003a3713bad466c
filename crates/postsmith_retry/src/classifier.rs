//! Sorting remote failures into retry categories.

use postsmith_error::RemoteError;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

static RATE_LIMIT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b429\b").expect("rate limit code regex is valid"));

static PERMISSION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b403\b").expect("permission code regex is valid"));

static RETRY_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)retry in\s+(\d+(?:\.\d+)?)\s*s\b").expect("retry hint regex is valid")
});

const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";
const PERMISSION_DENIED: &str = "PERMISSION_DENIED";

/// Retry category of a failed remote call.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum FailureClass {
    /// Quota or rate limit hit; retry the same tier after a delay
    #[display("rate limited")]
    RateLimited {
        /// Wait the provider suggested, in seconds
        suggested_wait_secs: Option<f64>,
    },
    /// The key may not use this model; a lower tier may still work
    #[display("permission denied")]
    PermissionDenied,
    /// Anything else; not retried
    #[display("other: {}", message)]
    Other {
        /// Original failure message
        message: String,
    },
}

/// Result of one remote call attempt.
///
/// A failure keeps the raw error next to its class so the caller can still
/// surface the provider's own status and message.
///
/// ```
/// use postsmith_error::RemoteError;
/// use postsmith_retry::{AttemptOutcome, FailureClass};
///
/// let outcome: AttemptOutcome<()> = Err(RemoteError::with_status(403, "denied")).into();
/// assert!(matches!(
///     outcome,
///     AttemptOutcome::Failed { class: FailureClass::PermissionDenied, .. }
/// ));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome<T> {
    /// The call returned a payload
    Success(T),
    /// The call failed
    Failed {
        /// Retry category of the failure
        class: FailureClass,
        /// The failure as reported
        error: RemoteError,
    },
}

impl<T> From<Result<T, RemoteError>> for AttemptOutcome<T> {
    fn from(result: Result<T, RemoteError>) -> Self {
        match result {
            Ok(value) => AttemptOutcome::Success(value),
            Err(error) => AttemptOutcome::Failed {
                class: classify(&error),
                error,
            },
        }
    }
}

/// Classify a remote failure.
///
/// An explicit 429 or 403 status decides the category outright. Otherwise the
/// provider status string and then the message text are searched for
/// rate-limit markers (`429`, `RESOURCE_EXHAUSTED`) before permission markers
/// (`403`, `PERMISSION_DENIED`).
///
/// # Examples
///
/// ```
/// use postsmith_error::RemoteError;
/// use postsmith_retry::{classify, FailureClass};
///
/// let err = RemoteError::new("429 Too Many Requests. Please retry in 5.2s.");
/// assert_eq!(
///     classify(&err),
///     FailureClass::RateLimited { suggested_wait_secs: Some(5.2) }
/// );
///
/// let err = RemoteError::with_status(403, "The caller does not have permission");
/// assert_eq!(classify(&err), FailureClass::PermissionDenied);
/// ```
#[instrument(level = "debug", skip(err), fields(status = ?err.status))]
pub fn classify(err: &RemoteError) -> FailureClass {
    let class = match err.status {
        Some(429) => rate_limited(&err.message),
        Some(403) => FailureClass::PermissionDenied,
        _ => classify_by_markers(err),
    };
    debug!(%class, "Classified remote failure");
    class
}

fn classify_by_markers(err: &RemoteError) -> FailureClass {
    let status_text = err.status_text.as_deref().unwrap_or_default();
    let message = err.message.as_str();

    if status_text == RESOURCE_EXHAUSTED
        || message.contains(RESOURCE_EXHAUSTED)
        || RATE_LIMIT_CODE.is_match(message)
    {
        rate_limited(message)
    } else if status_text == PERMISSION_DENIED
        || message.contains(PERMISSION_DENIED)
        || PERMISSION_CODE.is_match(message)
    {
        FailureClass::PermissionDenied
    } else {
        FailureClass::Other {
            message: err.message.clone(),
        }
    }
}

fn rate_limited(message: &str) -> FailureClass {
    FailureClass::RateLimited {
        suggested_wait_secs: suggested_wait(message),
    }
}

/// Extract a provider wait hint such as `retry in 5.2s`.
fn suggested_wait(message: &str) -> Option<f64> {
    RETRY_IN
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_is_rate_limited_without_hint() {
        let err = RemoteError::with_status(429, "Too many requests");
        assert_eq!(
            classify(&err),
            FailureClass::RateLimited {
                suggested_wait_secs: None
            }
        );
    }

    #[test]
    fn resource_exhausted_status_text_is_rate_limited() {
        let err = RemoteError::new("Quota exceeded for metric").status_text(RESOURCE_EXHAUSTED);
        assert!(matches!(classify(&err), FailureClass::RateLimited { .. }));
    }

    #[test]
    fn explicit_status_beats_message_markers() {
        let err = RemoteError::with_status(403, "previous call returned 429");
        assert_eq!(classify(&err), FailureClass::PermissionDenied);
    }

    #[test]
    fn code_must_stand_alone_in_message() {
        let err = RemoteError::new("request id 14290 failed");
        assert!(matches!(classify(&err), FailureClass::Other { .. }));
    }

    #[test]
    fn hint_is_case_insensitive_and_integer_friendly() {
        assert_eq!(suggested_wait("Please Retry In 30s."), Some(30.0));
        assert_eq!(suggested_wait("retry in 12.75 s"), Some(12.75));
        assert_eq!(suggested_wait("retry in 500ms"), None);
        assert_eq!(suggested_wait("retry later"), None);
    }

    #[test]
    fn other_keeps_original_message() {
        let err = RemoteError::with_status(500, "Internal error encountered.");
        assert_eq!(
            classify(&err),
            FailureClass::Other {
                message: "Internal error encountered.".to_string()
            }
        );
    }
}
