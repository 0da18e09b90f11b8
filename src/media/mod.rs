// Media acquisition over external tools
//
// - Processor: yt-dlp and ffmpeg backed implementation
// - Commands: command builders and process execution

pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use commands::*;
pub use processor::*;

use crate::config::AcquireConfig;
use crate::error::Result;

/// Main trait for media download and transcoding operations
#[async_trait]
pub trait MediaProcessorTrait: Send + Sync {
    /// Download the auto-generated subtitle track and return the subtitle file path
    async fn download_subtitles(
        &self,
        url: &str,
        language: &str,
        output_stem: &Path,
    ) -> Result<PathBuf>;

    /// Download the best audio-only stream
    async fn download_audio(&self, url: &str, output_path: &Path) -> Result<()>;

    /// Re-encode audio to compressed mp3
    async fn encode_audio(&self, input_path: &Path, output_path: &Path) -> Result<()>;

    /// Check that the external tools are available
    async fn check_availability(&self) -> Result<()>;
}

/// Factory for creating media processor instances
pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    pub fn create_processor(config: AcquireConfig) -> Box<dyn MediaProcessorTrait> {
        Box::new(processor::MediaProcessorImpl::new(config))
    }
}
