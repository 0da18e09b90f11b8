use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::acquire::VideoId;
use crate::config::AcquisitionMode;
use crate::error::Result;

/// Original text, a blank line, then the translation; lines are not paired
pub fn compose_bilingual(original: &str, translated: &str) -> String {
    format!("{}\n\n{}", original, translated)
}

/// Final artifact path for a video
pub fn artifact_path(
    output_dir: &Path,
    video_id: &VideoId,
    mode: AcquisitionMode,
    target_code: &str,
) -> PathBuf {
    match mode {
        AcquisitionMode::Subtitles => output_dir.join(format!("{}.{}.vtt", video_id, target_code)),
        AcquisitionMode::Transcribe => output_dir.join(format!("{}_subtitles.txt", video_id)),
    }
}

/// Write the bilingual artifact as UTF-8
pub async fn write_artifact<P: AsRef<Path>>(content: &str, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Writing bilingual subtitles: {}", output_path.display());

    fs::write(output_path, content).await?;

    info!("Bilingual subtitles written successfully");
    Ok(())
}
