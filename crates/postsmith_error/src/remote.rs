//! Raw failures reported by the generative-AI endpoint.

/// A failed remote call, before classification.
///
/// Carries whatever the transport or the provider's error envelope exposed:
/// an HTTP status code, the provider's status string (e.g.
/// `RESOURCE_EXHAUSTED`), and the provider's own message text. Transport
/// failures that never produced a response have no status.
///
/// # Examples
///
/// ```
/// use postsmith_error::RemoteError;
///
/// let err = RemoteError::with_status(429, "Quota exceeded. Please retry in 5.2s.")
///     .status_text("RESOURCE_EXHAUSTED");
/// assert_eq!(err.status, Some(429));
/// assert!(err.to_string().contains("HTTP 429"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{}{}", status_prefix(status, status_text), message)]
pub struct RemoteError {
    /// HTTP status code, if a response was received
    pub status: Option<u16>,
    /// Provider status string from the error envelope
    pub status_text: Option<String>,
    /// Provider (or transport) message text
    pub message: String,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl RemoteError {
    /// Create a remote error without a status code (transport failure).
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status: None,
            status_text: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a remote error carrying an HTTP status code.
    #[track_caller]
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status: Some(status),
            status_text: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the provider's status string.
    pub fn status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }
}

/// `HTTP 429 RESOURCE_EXHAUSTED: `, `HTTP 500: `, `UNAVAILABLE: `, or nothing.
fn status_prefix(status: &Option<u16>, status_text: &Option<String>) -> String {
    match (status, status_text) {
        (Some(code), Some(text)) => format!("HTTP {} {}: ", code, text),
        (Some(code), None) => format!("HTTP {}: ", code),
        (None, Some(text)) => format!("{}: ", text),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_only_known_parts() {
        let full = RemoteError::with_status(429, "slow down").status_text("RESOURCE_EXHAUSTED");
        assert_eq!(full.to_string(), "HTTP 429 RESOURCE_EXHAUSTED: slow down");
        assert_eq!(
            RemoteError::with_status(500, "boom").to_string(),
            "HTTP 500: boom"
        );
        assert_eq!(
            RemoteError::new("reset").status_text("UNAVAILABLE").to_string(),
            "UNAVAILABLE: reset"
        );
        assert_eq!(RemoteError::new("connection refused").to_string(), "connection refused");
    }
}
