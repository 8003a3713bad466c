//! Saved post history for Postsmith.
//!
//! [`PostRepository`] is the storage seam; two implementations ship:
//!
//! - [`InMemoryPostRepository`] keeps records in memory (tests, dry runs)
//! - [`FilePostRepository`] persists records to a single JSON file

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod file;
mod memory;
mod repository;

pub use file::FilePostRepository;
pub use memory::InMemoryPostRepository;
pub use repository::PostRepository;
