//! pose2stick - stick-figure video client
//!
//! Thin client for the pose2stick processing service: it marshals one
//! multipart upload, waits for the server-side render, and surfaces the two
//! result download links. All substantive work (pose extraction, rendering)
//! happens on the server.

mod api;
mod config;
mod ui;
mod upload;

use crate::api::ApiClient;
use crate::ui::TerminalStatus;
use crate::upload::{ProcessingJob, UploadController};
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// pose2stick - turn a video into a stick-figure animation
#[derive(Parser)]
#[command(name = "pose2stick")]
#[command(version)]
#[command(about = "Upload a video and get back its stick-figure render")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a video for processing and print the result links
    Process {
        /// Path to the video file
        video: PathBuf,

        /// Background style rendered behind the stick figure
        /// (accepted values are defined by the server)
        #[arg(short, long, default_value = "grid")]
        background: String,

        /// Keep the original audio track in the rendered video
        #[arg(long, default_value_t = false)]
        include_audio: bool,

        /// Download both result files into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the API base URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show configuration and data paths
    Config,
}

fn main() -> Result<ExitCode> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            video,
            background,
            include_audio,
            output,
            api_url,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            let succeeded =
                rt.block_on(run_process(video, background, include_audio, output, api_url))?;
            // Exit happens here, after the runtime has shut down cleanly
            if !succeeded {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Config => {
            show_config_info()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether the submission succeeded; the controller has already
/// surfaced any failure to the user.
async fn run_process(
    video: PathBuf,
    background: String,
    include_audio: bool,
    output: Option<PathBuf>,
    api_url: Option<String>,
) -> Result<bool> {
    let config = config::Config::load().unwrap_or_default();

    let client = match api_url {
        Some(url) => ApiClient::with_url(url),
        None => ApiClient::new(),
    };

    let job = ProcessingJob::new(video, background, Some(include_audio));

    let mut controller = UploadController::new(&client, TerminalStatus::new());
    let result = match controller.submit(&job).await {
        Ok(result) => result,
        // The controller already alerted; report failure back to main.
        Err(_) => return Ok(false),
    };

    let download_dir = output.or_else(|| config.output.download_dir.clone().map(PathBuf::from));
    if let Some(dir) = download_dir {
        println!("{}", "Downloading results...".bright_cyan());
        let video_path = client.download(&result.video_url, &dir).await?;
        let keypoints_path = client.download(&result.keypoints_url, &dir).await?;
        println!(
            "{} {}",
            "Saved:".bright_green(),
            video_path.display().to_string().bright_white()
        );
        println!(
            "{} {}",
            "Saved:".bright_green(),
            keypoints_path.display().to_string().bright_white()
        );
    }

    Ok(true)
}

fn show_config_info() -> Result<()> {
    println!("{}", "pose2stick Configuration\n".bright_cyan().bold());

    match config::get_config_path() {
        Ok(path) => {
            println!("{} {}", "Config file:".bright_yellow(), path.bright_white());
            if std::path::Path::new(&path).exists() {
                println!("  {} {}", "Status:".bright_cyan(), "Exists".bright_green());
            } else {
                println!(
                    "  {} {}",
                    "Status:".bright_cyan(),
                    "Not created yet (will use defaults)".bright_yellow()
                );
            }
        }
        Err(e) => {
            println!(
                "{} Could not determine config path: {}",
                "Error:".bright_red(),
                e
            );
        }
    }

    // Creates the default config file on first run
    let config = config::Config::init().unwrap_or_default();
    println!(
        "\n{} {}",
        "API base URL:".bright_yellow(),
        config.api.base_url.bright_white()
    );
    println!(
        "{} {}",
        "Timeout:".bright_yellow(),
        format!("{}s", config.api.timeout_seconds).bright_white()
    );
    println!(
        "{} {}",
        "Verify SSL:".bright_yellow(),
        config.api.verify_ssl.to_string().bright_white()
    );
    match config.output.download_dir {
        Some(dir) => println!("{} {}", "Download dir:".bright_yellow(), dir.bright_white()),
        None => println!(
            "{} {}",
            "Download dir:".bright_yellow(),
            "(not set - results are not downloaded by default)".bright_black()
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_submission_reports_failure_instead_of_exiting() {
        // Validation fails before any network work, so no server is needed.
        let succeeded = run_process(
            PathBuf::from("/nonexistent/clip.mp4"),
            "grid".to_string(),
            false,
            None,
            Some("http://127.0.0.1:9".to_string()),
        )
        .await
        .unwrap();

        assert!(!succeeded);
    }
}
