use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, BisubError};

/// Abstract external media tool invocation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
    failure: fn(String) -> BisubError,
}

impl MediaCommand {
    /// Create a new command whose failures are reported through `failure`
    pub fn new<S1: Into<String>, S2: Into<String>>(
        binary_path: S1,
        description: S2,
        failure: fn(String) -> BisubError,
    ) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
            failure,
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add a path argument
    pub fn path<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add an option followed by its value
    pub fn opt<S1: Into<String>, S2: Into<String>>(self, flag: S1, value: S2) -> Self {
        self.arg(flag).arg(value)
    }

    /// Run the command and return its stdout
    pub async fn execute(&self) -> Result<String> {
        debug!("Executing media command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| (self.failure)(format!("Failed to execute {}: {}", self.binary_path, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err((self.failure)(format!(
                "{} failed: {}",
                self.description,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Builder for yt-dlp invocations
pub struct YtDlpCommandBuilder {
    binary_path: String,
}

impl YtDlpCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Build auto-generated subtitle download command; yt-dlp appends `.<lang>.vtt` to `output_stem`
    pub fn auto_subtitles<P: AsRef<Path>>(
        &self,
        url: &str,
        language: &str,
        output_stem: P,
    ) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Subtitle download", BisubError::Extraction)
            .arg("--write-auto-sub")
            .opt("--sub-lang", language)
            .opt("--sub-format", "vtt")
            .arg("--skip-download")
            .arg("-o")
            .path(output_stem)
            .arg(url)
    }

    /// Build best-audio download command
    pub fn best_audio<P: AsRef<Path>>(&self, url: &str, output_path: P) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Audio download", BisubError::Extraction)
            .opt("-f", "bestaudio")
            .arg("--force-overwrites")
            .arg("-o")
            .path(output_path)
            .arg(url)
    }

    pub fn version_check(&self) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Version check", BisubError::Extraction)
            .arg("--version")
    }
}

/// Builder for ffmpeg invocations
pub struct FfmpegCommandBuilder {
    binary_path: String,
}

impl FfmpegCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Build mp3 re-encoding command
    pub fn encode_mp3<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: P,
        bitrate: &str,
    ) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Audio encoding", BisubError::Encoding)
            .arg("-y")
            .arg("-i")
            .path(input_path)
            .arg("-vn")
            .opt("-c:a", "libmp3lame")
            .opt("-b:a", bitrate)
            .path(output_path)
    }

    pub fn version_check(&self) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Version check", BisubError::Encoding)
            .arg("-version")
    }
}
