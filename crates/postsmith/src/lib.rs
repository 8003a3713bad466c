//! Postsmith command-line front end.
//!
//! Generates a social media post (title, caption, hashtags, image idea) from
//! a short brief, optionally renders a matching image, and keeps a per-user
//! history of saved posts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod observability;
