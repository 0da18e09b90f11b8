//! Bisub - Bilingual Subtitles for YouTube Videos
//!
//! Entry point: downloads subtitles or transcribes audio for one video,
//! translates the text, and writes a bilingual subtitle file.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use bisub::cli::Args;
use bisub::config::{AcquisitionMode, Config};
use bisub::error::BisubError;
use bisub::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    info!("Welcome to the YouTube Subtitle Translator!");

    // Errors end the run here; they are logged, not turned into an exit code
    match run(args).await {
        Ok(()) => info!("Bisub completed successfully"),
        Err(e) => error!("Error: {}", e),
    }

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let workflow = Workflow::new(config).await?;
    let output_path = workflow.run(&args.url).await?;
    info!("Translated subtitles saved to: {}", output_path.display());
    Ok(())
}

/// Load configuration from file, then apply command line overrides and credentials
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    if let Some(mode) = &args.mode {
        config.acquire.mode = parse_acquisition_mode(mode)?;
    }
    if let Some(target_language) = &args.target_language {
        config.translate.target_language = target_language.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output.dir = output_dir.clone();
    }
    if let Some(chunk_size) = args.chunk_size {
        config.translate.chunk_size = chunk_size;
    }

    Ok(config.with_env_credentials())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".bisub").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "bisub.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("bisub.log").display());

    Ok(())
}

/// Parse acquisition mode from string
fn parse_acquisition_mode(mode: &str) -> Result<AcquisitionMode> {
    match mode.to_lowercase().as_str() {
        "subtitles" | "subs" => Ok(AcquisitionMode::Subtitles),
        "transcribe" | "transcription" => Ok(AcquisitionMode::Transcribe),
        _ => Err(BisubError::Config(format!(
            "Invalid acquisition mode '{}'. Valid modes: subtitles, transcribe",
            mode
        )).into()),
    }
}
