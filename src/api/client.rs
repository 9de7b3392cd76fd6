//! API client for the pose2stick processing service
//!
//! Handles all HTTP communication with the backend API.

use async_trait::async_trait;
use reqwest::{multipart, Client};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::upload::{ProcessService, ProcessingJob, ProcessingResult};

/// API base URL (can be overridden via environment variable)
const DEFAULT_API_URL: &str = "https://pose2stick.onrender.com";
const DEFAULT_TIMEOUT_SECONDS: u64 = 300;
const PROCESS_PATH: &str = "/api/process";

// Multipart field names the server keys on
const VIDEO_FIELD: &str = "video";
const BACKGROUND_FIELD: &str = "background";
const INCLUDE_AUDIO_FIELD: &str = "include_audio";

/// API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    RequestFailed { status: u16 },

    #[error("Invalid response from server: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

/// API client for pose2stick
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from config and environment overrides
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_default();

        let base_url = std::env::var("POSE2STICK_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| config.api.base_url.clone());

        let timeout_seconds = std::env::var("POSE2STICK_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or_else(|| config.api.timeout_seconds.max(1));

        let verify_ssl =
            parse_bool_env("POSE2STICK_API_VERIFY_SSL").unwrap_or(config.api.verify_ssl);

        Self::with_settings(base_url, timeout_seconds, verify_ssl)
    }

    /// Create with custom base URL
    pub fn with_url(base_url: String) -> Self {
        Self::with_settings(base_url, DEFAULT_TIMEOUT_SECONDS, true)
    }

    fn with_settings(base_url: String, timeout_seconds: u64, verify_ssl: bool) -> Self {
        let timeout = Duration::from_secs(timeout_seconds.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .unwrap_or_else(|_| Client::new());

        ApiClient {
            client,
            base_url: normalize_base_url(&base_url),
        }
    }

    /// Upload one video for processing and return the result URLs.
    ///
    /// Exactly one request is issued; nothing is retried. A non-2xx status
    /// fails with the status code alone, the body is never inspected.
    pub async fn process_video(
        &self,
        job: &ProcessingJob,
    ) -> Result<ProcessingResult, ApiError> {
        // Validate before any network work
        if let Err(errors) = job.validate() {
            return Err(ApiError::Validation(errors.join(", ")));
        }

        let url = format!("{}{}", self.base_url, PROCESS_PATH);
        let form = self.build_form(job).await?;

        debug!(
            url = %url,
            background = %job.background,
            include_audio = job.include_audio_field(),
            "uploading video for processing"
        );

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        ProcessingResult::from_json(&body).map_err(|err| ApiError::Parse(err.to_string()))
    }

    async fn build_form(&self, job: &ProcessingJob) -> Result<multipart::Form, ApiError> {
        let bytes = tokio::fs::read(&job.video_path).await?;
        let mime = mime_guess::from_path(&job.video_path).first_or_octet_stream();

        let video = multipart::Part::bytes(bytes)
            .file_name(job.video_file_name())
            .mime_str(mime.essence_str())?;

        Ok(multipart::Form::new()
            .part(VIDEO_FIELD, video)
            .text(BACKGROUND_FIELD, job.background.clone())
            .text(INCLUDE_AUDIO_FIELD, job.include_audio_field()))
    }

    /// Fetch a result URL into `dest_dir`, named after the URL's last path
    /// segment. Returns the written path.
    pub async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, ApiError> {
        debug!(url = %url, dest = %dest_dir.display(), "downloading result");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tokio::fs::create_dir_all(dest_dir).await?;
        let dest = dest_dir.join(file_name_from_url(url));
        tokio::fs::write(&dest, &bytes).await?;

        Ok(dest)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessService for ApiClient {
    async fn process(&self, job: &ProcessingJob) -> Result<ProcessingResult, ApiError> {
        self.process_video(job).await
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return DEFAULT_API_URL.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}

fn file_name_from_url(url: &str) -> String {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "download.bin".to_string())
}

fn parse_bool_env(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    parse_bool_value(&value)
}

fn parse_bool_value(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
