//! Upload module
//!
//! Job data and the controller that turns one submission into one request.

pub mod controller;
pub mod job;

pub use controller::{ProcessService, UiState, UploadController, SUCCESS_MESSAGE};
pub use job::{ProcessingJob, ProcessingResult};
