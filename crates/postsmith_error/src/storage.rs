//! History store error types.

/// Kinds of history store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the directory holding the history file
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write the history file
    #[display("Failed to write history: {}", _0)]
    FileWrite(String),
    /// Failed to read the history file
    #[display("Failed to read history: {}", _0)]
    FileRead(String),
    /// History file exists but does not hold valid records
    #[display("Corrupt history: {}", _0)]
    Corrupt(String),
    /// No saved post with the given id
    #[display("Saved post not found: {}", _0)]
    NotFound(String),
}

/// History store error with location tracking.
///
/// # Examples
///
/// ```
/// use postsmith_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("42".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
