//! Upload controller
//!
//! Converts one submission into one HTTP request and reflects its outcome in
//! the status view.

use async_trait::async_trait;
use tracing::error;

use super::job::{ProcessingJob, ProcessingResult};
use crate::api::ApiError;
use crate::ui::StatusView;

/// Fixed message shown after a successful submission
pub const SUCCESS_MESSAGE: &str = "✅ Your video is ready! You can now download it.";

/// The one network operation the controller depends on, behind a trait so
/// tests can substitute a fake with no real network.
#[async_trait]
pub trait ProcessService {
    async fn process(&self, job: &ProcessingJob) -> Result<ProcessingResult, ApiError>;
}

#[async_trait]
impl<'a, S: ProcessService + Sync> ProcessService for &'a S {
    async fn process(&self, job: &ProcessingJob) -> Result<ProcessingResult, ApiError> {
        (**self).process(job).await
    }
}

/// Submission lifecycle: Idle -> Busy -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Busy,
}

impl UiState {
    /// Enter Busy. Refuses when a submission is already in flight.
    fn begin(&mut self) -> bool {
        if *self == UiState::Busy {
            return false;
        }
        *self = UiState::Busy;
        true
    }

    fn finish(&mut self) {
        *self = UiState::Idle;
    }
}

/// Drives one submission against the processing service and mirrors the
/// outcome onto the injected status view.
pub struct UploadController<S, V> {
    service: S,
    view: V,
    state: UiState,
}

impl<S: ProcessService, V: StatusView> UploadController<S, V> {
    pub fn new(service: S, view: V) -> Self {
        UploadController {
            service,
            view,
            state: UiState::default(),
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> UiState {
        self.state
    }

    #[allow(dead_code)]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Submit one job: show the busy indicator, issue exactly one request,
    /// then set the download links and success message or raise one alert.
    ///
    /// The busy indicator is hidden exactly once after the request settles,
    /// on both paths, and the controller returns to Idle so the user can
    /// resubmit. An overlapping submission is rejected, not raced; `&mut
    /// self` already serializes callers, so the Busy rejection is a backstop
    /// rather than the primary guard.
    pub async fn submit(&mut self, job: &ProcessingJob) -> Result<ProcessingResult, ApiError> {
        if !self.state.begin() {
            return Err(ApiError::Validation(
                "a submission is already in progress".to_string(),
            ));
        }

        self.view.busy();
        self.view.clear_status();

        let outcome = self.service.process(job).await;

        match &outcome {
            Ok(result) => {
                self.view
                    .set_download_links(&result.video_url, &result.keypoints_url);
                self.view.set_status(SUCCESS_MESSAGE);
            }
            Err(err) => {
                error!(error = %err, "video processing failed");
                self.view.alert(&format!("Error processing video: {err}"));
            }
        }

        self.view.idle();
        self.state.finish();

        outcome
    }
}
