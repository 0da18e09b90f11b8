use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::AcquisitionMode;
use crate::error::Result;
use crate::media::{MediaProcessorTrait, subtitle_file_path};
use super::{Acquisition, TextAcquirer, VideoId};

/// Acquires text from the auto-generated subtitle track
pub struct SubtitleAcquirer {
    media: Arc<dyn MediaProcessorTrait>,
    language: String,
}

impl SubtitleAcquirer {
    pub fn new(media: Arc<dyn MediaProcessorTrait>, language: String) -> Self {
        Self { media, language }
    }

    /// Where the subtitle file for `video_id` lands under `output_dir`
    pub fn subtitle_path(&self, output_dir: &Path, video_id: &VideoId) -> PathBuf {
        subtitle_file_path(&output_dir.join(video_id.as_str()), &self.language)
    }
}

#[async_trait]
impl TextAcquirer for SubtitleAcquirer {
    async fn acquire(&self, url: &str, output_dir: &Path) -> Result<Acquisition> {
        let video_id = VideoId::from_url(url)?;
        info!("Downloading subtitles for video {}", video_id);

        let output_stem = output_dir.join(video_id.as_str());
        let subtitle_path = self.media
            .download_subtitles(url, &self.language, &output_stem)
            .await?;

        let text = tokio::fs::read_to_string(&subtitle_path).await?;
        info!("Read {} lines of subtitles from {}", text.lines().count(), subtitle_path.display());

        Ok(Acquisition {
            video_id,
            text,
            source_path: Some(subtitle_path),
            mode: AcquisitionMode::Subtitles,
        })
    }

    fn mode(&self) -> AcquisitionMode {
        AcquisitionMode::Subtitles
    }
}
