//! Status view
//!
//! The observable surface of one submission: a busy indicator, a status
//! line, two download link targets, and an error alert. The controller only
//! writes to this trait, so tests substitute a recording fake.

use colored::*;

use super::spinner::Spinner;

pub trait StatusView {
    /// Show the busy indicator.
    fn busy(&mut self);

    /// Hide the busy indicator. Must be harmless when called twice.
    fn idle(&mut self);

    /// Drop any status left over from a previous submission.
    fn clear_status(&mut self);

    fn set_status(&mut self, message: &str);

    fn set_download_links(&mut self, video_url: &str, keypoints_url: &str);

    fn alert(&mut self, message: &str);
}

/// Renders submission status on the terminal.
#[derive(Default)]
pub struct TerminalStatus {
    spinner: Option<Spinner>,
}

impl TerminalStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusView for TerminalStatus {
    fn busy(&mut self) {
        if self.spinner.is_none() {
            self.spinner = Some(Spinner::start("Processing video..."));
        }
    }

    fn idle(&mut self) {
        if let Some(mut spinner) = self.spinner.take() {
            spinner.stop();
        }
    }

    fn clear_status(&mut self) {
        // Nothing persists between runs on a terminal.
    }

    fn set_status(&mut self, message: &str) {
        println!("{}", message.bright_green());
    }

    fn set_download_links(&mut self, video_url: &str, keypoints_url: &str) {
        println!(
            "{} {}",
            "Video:".bright_white(),
            video_url.bright_cyan()
        );
        println!(
            "{} {}",
            "Keypoints:".bright_white(),
            keypoints_url.bright_cyan()
        );
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{} {}", "✗".bright_red(), message.bright_red());
    }
}
