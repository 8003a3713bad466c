//! Error types for Postsmith.
//!
//! This crate provides the error types shared by every Postsmith crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use postsmith_error::{PostsmithResult, ConfigError};
//!
//! fn load() -> PostsmithResult<String> {
//!     Err(ConfigError::new("Missing [retry] section"))?
//! }
//!
//! match load() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod output;
mod remote;
mod storage;

pub use config::ConfigError;
pub use error::{PostsmithError, PostsmithErrorKind, PostsmithResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use output::OutputError;
pub use remote::RemoteError;
pub use storage::{StorageError, StorageErrorKind};
