//! Terminal errors from a logical generation request.

/// Why a logical generation request gave up.
///
/// Every variant keeps the remote service's own message text so the caller
/// can render a precise explanation.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Rate limited on every attempt until the retry budget ran out
    #[display("Rate limit persisted after {} attempts: {}", attempts, message)]
    RateLimited {
        /// Message from the last rate-limited attempt
        message: String,
        /// Network calls made before giving up
        attempts: u32,
    },
    /// Permission denied, either with no lower tier to fall back to or with
    /// the fallback attempt also failing
    #[display("Permission denied: {}", message)]
    PermissionDenied {
        /// Message from the original (pre-downgrade) failure
        message: String,
        /// Message from the failed fallback attempt, if one was made
        fallback: Option<String>,
    },
    /// Any other remote failure; never retried
    #[display("Remote call failed: {}", message)]
    Remote {
        /// HTTP status code, if any
        status: Option<u16>,
        /// Message from the remote service or transport
        message: String,
    },
    /// The call succeeded but the payload was unusable
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use postsmith_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::RateLimited {
///     message: "Resource has been exhausted".to_string(),
///     attempts: 3,
/// });
/// assert!(err.is_rate_limited());
/// assert_eq!(err.message(), "Resource has been exhausted");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }

    /// The most specific message available, without wrapper text.
    pub fn message(&self) -> &str {
        match &self.kind {
            GenerationErrorKind::RateLimited { message, .. }
            | GenerationErrorKind::PermissionDenied { message, .. }
            | GenerationErrorKind::Remote { message, .. } => message,
            GenerationErrorKind::MalformedResponse(message) => message,
        }
    }

    /// True if the request gave up because of rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, GenerationErrorKind::RateLimited { .. })
    }

    /// True if the request gave up because of a permission failure.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self.kind, GenerationErrorKind::PermissionDenied { .. })
    }

    /// Human-readable explanation suitable for showing to an end user.
    ///
    /// ```
    /// use postsmith_error::{GenerationError, GenerationErrorKind};
    ///
    /// let err = GenerationError::new(GenerationErrorKind::PermissionDenied {
    ///     message: "The caller does not have permission".to_string(),
    ///     fallback: None,
    /// });
    /// assert!(err.user_message().contains("permission"));
    /// ```
    pub fn user_message(&self) -> String {
        match &self.kind {
            GenerationErrorKind::RateLimited { .. } => {
                "The AI service usage quota was exceeded. Wait a minute and try again.".to_string()
            }
            GenerationErrorKind::PermissionDenied { .. } => format!(
                "Your API key does not have permission for this model: {}",
                self.message()
            ),
            GenerationErrorKind::Remote { .. } | GenerationErrorKind::MalformedResponse(_) => {
                self.message().to_string()
            }
        }
    }
}
