use clap::Parser;
use std::path::PathBuf;

/// Video processed when no URL is given
pub const DEFAULT_VIDEO_URL: &str = "https://www.youtube.com/watch?v=BdfsuRS8UfA";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// YouTube video URL
    #[arg(long, default_value = DEFAULT_VIDEO_URL)]
    pub url: String,

    /// Acquisition mode (subtitles, transcribe)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Target language name for translation
    #[arg(short, long)]
    pub target_language: Option<String>,

    /// Output directory for downloads and the bilingual subtitles
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum characters per translation request
    #[arg(long)]
    pub chunk_size: Option<usize>,
}
