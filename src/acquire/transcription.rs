use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::AcquisitionMode;
use crate::error::Result;
use crate::llm::SpeechToText;
use crate::media::MediaProcessorTrait;
use super::{Acquisition, TextAcquirer, VideoId};

/// Acquires text by downloading audio, re-encoding it, and transcribing it
pub struct TranscriptionAcquirer {
    media: Arc<dyn MediaProcessorTrait>,
    speech: Arc<dyn SpeechToText>,
}

impl TranscriptionAcquirer {
    pub fn new(media: Arc<dyn MediaProcessorTrait>, speech: Arc<dyn SpeechToText>) -> Self {
        Self { media, speech }
    }

    /// Downloaded audio stream and re-encoded mp3 paths for `video_id`
    pub fn media_paths(output_dir: &Path, video_id: &VideoId) -> (PathBuf, PathBuf) {
        (
            output_dir.join(format!("{}.mp4", video_id)),
            output_dir.join(format!("{}.mp3", video_id)),
        )
    }
}

#[async_trait]
impl TextAcquirer for TranscriptionAcquirer {
    async fn acquire(&self, url: &str, output_dir: &Path) -> Result<Acquisition> {
        let video_id = VideoId::from_url(url)?;
        let (video_path, audio_path) = Self::media_paths(output_dir, &video_id);

        // Step 1: Download audio-only stream
        self.media.download_audio(url, &video_path).await?;

        // Step 2: Re-encode to mp3
        self.media.encode_audio(&video_path, &audio_path).await?;

        // Step 3: Speech-to-text
        info!("Transcribing {}", audio_path.display());
        let text = self.speech.transcribe(&audio_path).await?;
        info!("Transcription completed ({} characters)", text.chars().count());

        Ok(Acquisition {
            video_id,
            text,
            source_path: Some(audio_path),
            mode: AcquisitionMode::Transcribe,
        })
    }

    fn mode(&self) -> AcquisitionMode {
        AcquisitionMode::Transcribe
    }
}
