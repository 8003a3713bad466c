//! Test utilities for Postsmith model tests.
//!
//! This module provides a scripted mock backend and response helpers.

pub mod mock_backend;

#[allow(unused_imports)]
pub use mock_backend::{
    MockBackend, MockResponse, RecordedCall, image_response, permission_denied, rate_limited,
    text_response,
};
