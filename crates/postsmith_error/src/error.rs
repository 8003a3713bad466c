//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, OutputError, RemoteError, StorageError};

/// Every error condition Postsmith can report.
///
/// # Examples
///
/// ```
/// use postsmith_error::{PostsmithError, RemoteError};
///
/// let err: PostsmithError = RemoteError::new("connection reset").into();
/// assert!(format!("{}", err).contains("connection reset"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PostsmithErrorKind {
    /// Unclassified remote failure
    #[from(RemoteError)]
    Remote(RemoteError),
    /// Terminal failure of a generation request
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// History store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Failed to write a command result
    #[from(OutputError)]
    Output(OutputError),
}

/// Postsmith error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Postsmith Error: {}", _0)]
pub struct PostsmithError(Box<PostsmithErrorKind>);

impl PostsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: PostsmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PostsmithErrorKind {
        &self.0
    }
}

impl<T> From<T> for PostsmithError
where
    T: Into<PostsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Postsmith operations.
pub type PostsmithResult<T> = std::result::Result<T, PostsmithError>;
