//! Processing job
//!
//! Input and result data for one upload to the pose2stick API.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One video-processing request, built fresh per submission
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    /// Path to the source video file
    pub video_path: PathBuf,
    /// Background style rendered behind the stick figure (server-defined set)
    pub background: String,
    /// Keep the original audio track in the rendered video
    pub include_audio: bool,
}

impl ProcessingJob {
    /// Create a new job. A missing audio toggle is treated as "off", never as
    /// an error.
    pub fn new(
        video_path: PathBuf,
        background: String,
        include_audio: Option<bool>,
    ) -> Self {
        ProcessingJob {
            video_path,
            background,
            include_audio: include_audio.unwrap_or(false),
        }
    }

    /// The wire value for the `include_audio` form field
    pub fn include_audio_field(&self) -> &'static str {
        if self.include_audio {
            "true"
        } else {
            "false"
        }
    }

    /// File name sent with the multipart `video` part
    pub fn video_file_name(&self) -> String {
        self.video_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string())
    }

    /// Validate the job before any network work happens
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.video_path.exists() {
            errors.push(format!(
                "Video file '{}' does not exist",
                self.video_path.display()
            ));
        } else if self.video_path.is_dir() {
            errors.push(format!(
                "'{}' is a directory, not a video file",
                self.video_path.display()
            ));
        }

        if self.background.trim().is_empty() {
            errors.push("Background choice cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Response from the API after successful processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// URL of the rendered stick-figure video
    pub video_url: String,
    /// URL of the extracted pose keypoints JSON
    pub keypoints_url: String,
}

impl ProcessingResult {
    /// Parse a response body. A body that is not JSON or lacks either URL
    /// field is rejected.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_video() -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".mp4").unwrap();
        file.write_all(b"not really mp4 bytes").unwrap();
        file
    }

    #[test]
    fn missing_audio_toggle_means_false() {
        let video = sample_video();
        let job = ProcessingJob::new(video.path().to_path_buf(), "grid".to_string(), None);
        assert!(!job.include_audio);
        assert_eq!(job.include_audio_field(), "false");
    }

    #[test]
    fn audio_toggle_maps_to_wire_literals() {
        let video = sample_video();
        let on = ProcessingJob::new(video.path().to_path_buf(), "grid".to_string(), Some(true));
        let off = ProcessingJob::new(video.path().to_path_buf(), "grid".to_string(), Some(false));
        assert_eq!(on.include_audio_field(), "true");
        assert_eq!(off.include_audio_field(), "false");
    }

    #[test]
    fn rejects_missing_video_file() {
        let job = ProcessingJob::new(
            PathBuf::from("/nonexistent/clip.mp4"),
            "grid".to_string(),
            None,
        );
        let errors = job.validate().unwrap_err();
        assert!(errors[0].contains("does not exist"));
    }

    #[test]
    fn rejects_empty_background() {
        let video = sample_video();
        let job = ProcessingJob::new(video.path().to_path_buf(), "   ".to_string(), None);
        let errors = job.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Background")));
    }

    #[test]
    fn accepts_valid_job() {
        let video = sample_video();
        let job = ProcessingJob::new(video.path().to_path_buf(), "grid".to_string(), Some(true));
        assert!(job.validate().is_ok());
    }

    #[test]
    fn result_parses_both_urls() {
        let result = ProcessingResult::from_json(
            r#"{"video_url":"https://x/v.mp4","keypoints_url":"https://x/k.json"}"#,
        )
        .unwrap();
        assert_eq!(result.video_url, "https://x/v.mp4");
        assert_eq!(result.keypoints_url, "https://x/k.json");
    }

    #[test]
    fn result_rejects_missing_field() {
        assert!(ProcessingResult::from_json(r#"{"video_url":"https://x/v.mp4"}"#).is_err());
    }

    #[test]
    fn result_rejects_malformed_body() {
        assert!(ProcessingResult::from_json("<html>Internal Server Error</html>").is_err());
    }
}
