// Source text acquisition
//
// Two strategies produce a transcript for a video URL:
// - Subtitles: auto-generated subtitle track via yt-dlp
// - Transcription: audio download, mp3 re-encode, then speech-to-text

pub mod video;
pub mod subtitles;
pub mod transcription;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use video::VideoId;
pub use subtitles::SubtitleAcquirer;
pub use transcription::TranscriptionAcquirer;

use crate::config::{AcquireConfig, AcquisitionMode};
use crate::error::Result;
use crate::llm::SpeechToText;
use crate::media::MediaProcessorTrait;

/// Source text obtained for one video
#[derive(Debug, Clone)]
pub struct Acquisition {
    pub video_id: VideoId,
    pub text: String,
    /// Local file the text came from, if any
    pub source_path: Option<PathBuf>,
    pub mode: AcquisitionMode,
}

/// Text acquisition capability
#[async_trait]
pub trait TextAcquirer: Send + Sync {
    /// Fetch the source text for `url`, writing intermediate files under `output_dir`
    async fn acquire(&self, url: &str, output_dir: &Path) -> Result<Acquisition>;

    /// Strategy implemented by this acquirer
    fn mode(&self) -> AcquisitionMode;
}

/// Factory for creating acquirer instances
pub struct AcquirerFactory;

impl AcquirerFactory {
    /// Create the acquirer selected by the configured mode
    pub fn create_acquirer(
        config: AcquireConfig,
        media: Arc<dyn MediaProcessorTrait>,
        speech: Arc<dyn SpeechToText>,
    ) -> Box<dyn TextAcquirer> {
        match config.mode {
            AcquisitionMode::Subtitles => {
                Box::new(SubtitleAcquirer::new(media, config.subtitle_language))
            }
            AcquisitionMode::Transcribe => {
                Box::new(TranscriptionAcquirer::new(media, speech))
            }
        }
    }
}
