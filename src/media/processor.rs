use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, debug};

use crate::config::{AcquireConfig, AcquisitionMode};
use crate::error::{Result, BisubError};
use super::{MediaProcessorTrait, YtDlpCommandBuilder, FfmpegCommandBuilder};

/// Concrete media processor backed by yt-dlp and ffmpeg
pub struct MediaProcessorImpl {
    config: AcquireConfig,
    ytdlp: YtDlpCommandBuilder,
    ffmpeg: FfmpegCommandBuilder,
}

impl MediaProcessorImpl {
    pub fn new(config: AcquireConfig) -> Self {
        let ytdlp = YtDlpCommandBuilder::new(&config.ytdlp_path);
        let ffmpeg = FfmpegCommandBuilder::new(&config.ffmpeg_path);

        Self {
            config,
            ytdlp,
            ffmpeg,
        }
    }
}

/// Path yt-dlp writes an auto-generated subtitle track to for a given output stem
pub fn subtitle_file_path(output_stem: &Path, language: &str) -> PathBuf {
    let mut name = output_stem.as_os_str().to_os_string();
    name.push(format!(".{}.vtt", language));
    PathBuf::from(name)
}

#[async_trait]
impl MediaProcessorTrait for MediaProcessorImpl {
    async fn download_subtitles(
        &self,
        url: &str,
        language: &str,
        output_stem: &Path,
    ) -> Result<PathBuf> {
        info!("Downloading auto-generated {} subtitles for {}", language, url);

        self.ytdlp
            .auto_subtitles(url, language, output_stem)
            .execute()
            .await?;

        let subtitle_path = subtitle_file_path(output_stem, language);
        if !tokio::fs::try_exists(&subtitle_path).await? {
            return Err(BisubError::Extraction(format!(
                "No {} auto-generated subtitles were written to {}",
                language,
                subtitle_path.display()
            )));
        }

        info!("Subtitles downloaded to: {}", subtitle_path.display());
        Ok(subtitle_path)
    }

    async fn download_audio(&self, url: &str, output_path: &Path) -> Result<()> {
        info!("Downloading audio stream for {} to {}", url, output_path.display());

        self.ytdlp.best_audio(url, output_path).execute().await?;

        info!("Audio download completed");
        Ok(())
    }

    async fn encode_audio(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        info!("Encoding {} to {}", input_path.display(), output_path.display());

        self.ffmpeg
            .encode_mp3(input_path, output_path, &self.config.audio_bitrate)
            .execute()
            .await?;

        info!("Audio encoding completed");
        Ok(())
    }

    async fn check_availability(&self) -> Result<()> {
        let version = self.ytdlp.version_check().execute().await?;
        debug!("yt-dlp version: {}", version.trim());

        // ffmpeg is only needed on the transcription path
        if self.config.mode == AcquisitionMode::Transcribe {
            let version = self.ffmpeg.version_check().execute().await?;
            debug!("ffmpeg: {}", version.lines().next().unwrap_or("unknown version"));
        }

        info!("Media tools are available");
        Ok(())
    }
}
