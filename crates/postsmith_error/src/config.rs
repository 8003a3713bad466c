//! Configuration error types.

use std::fmt;

/// Configuration error with the offending key, when known.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Configuration key or environment variable involved
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use postsmith_error::ConfigError;
    ///
    /// let err = ConfigError::new("retry.max_attempts must be at least 1");
    /// assert!(err.message.contains("max_attempts"));
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error for a required environment variable that is not set.
    ///
    /// ```
    /// use postsmith_error::ConfigError;
    ///
    /// let err = ConfigError::missing_env("GEMINI_API_KEY");
    /// assert_eq!(err.key.as_deref(), Some("GEMINI_API_KEY"));
    /// assert!(err.to_string().contains("GEMINI_API_KEY"));
    /// ```
    #[track_caller]
    pub fn missing_env(var: &str) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: "environment variable not set".to_string(),
            key: Some(var.to_string()),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration Error: {}", self.message)?;
        if let Some(key) = &self.key {
            write!(f, " (key `{}`)", key)?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
