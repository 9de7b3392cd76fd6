//! API module
//!
//! HTTP client for communicating with the pose2stick backend.

mod client;

pub use client::{ApiClient, ApiError};
