//! Errors writing command results.

/// Failure to emit a result (an image file, JSON on stdout).
///
/// # Examples
///
/// ```
/// use postsmith_error::OutputError;
///
/// let err = OutputError::new("post.png", "permission denied");
/// assert_eq!(err.target, "post.png");
/// assert!(err.to_string().contains("could not write post.png"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Output Error: could not write {}: {} at line {} in {}", target, message, line, file)]
pub struct OutputError {
    /// What was being written: a file path or "stdout"
    pub target: String,
    /// Underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl OutputError {
    /// Create a new OutputError at the current location.
    #[track_caller]
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            target: target.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
