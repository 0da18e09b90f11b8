use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, BisubError};

/// Environment variable holding the language-model API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub acquire: AcquireConfig,
    pub translate: TranslateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Base URL of the OpenAI-compatible API
    pub endpoint: String,
    /// Chat model used for translation
    pub model: String,
    /// Speech-to-text model used in transcription mode
    pub transcription_model: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// API key, taken from the environment and never written back out
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionMode {
    /// Subtitles: download the auto-generated subtitle track only
    Subtitles,
    /// Transcribe: download audio, re-encode it, and run speech-to-text
    Transcribe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquireConfig {
    /// Acquisition strategy
    pub mode: AcquisitionMode,
    /// Path to yt-dlp binary
    pub ytdlp_path: String,
    /// Path to ffmpeg binary
    pub ffmpeg_path: String,
    /// Language of the auto-generated subtitle track
    pub subtitle_language: String,
    /// Bitrate for the re-encoded mp3
    pub audio_bitrate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Target language name handed to the model
    pub target_language: String,
    /// Short code used in the subtitle output file name
    pub target_code: String,
    /// Maximum characters per translation request
    pub chunk_size: usize,
    /// System message sent with every translation request
    pub system_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for downloaded media and the bilingual artifact
    pub dir: PathBuf,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            model: "o4-mini".to_string(),
            transcription_model: "whisper-1".to_string(),
            timeout_secs: 300,
            api_key: None,
        }
    }
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            mode: AcquisitionMode::Subtitles,
            ytdlp_path: "yt-dlp".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            subtitle_language: "en".to_string(),
            audio_bitrate: "64k".to_string(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            target_language: "Simplified Chinese".to_string(),
            target_code: "cn".to_string(),
            chunk_size: 2000,
            system_prompt: "You are a helpful assistant that translates text.".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("downloads"),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BisubError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| BisubError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| BisubError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| BisubError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Pick up the API key from the process environment
    pub fn with_env_credentials(mut self) -> Self {
        self.openai.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.translate.chunk_size == 0 {
            return Err(BisubError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.translate.target_language.trim().is_empty() {
            return Err(BisubError::Config("target_language must not be empty".to_string()));
        }
        if self.openai.api_key.is_none() {
            return Err(BisubError::Config(format!("{} is not set", API_KEY_ENV)));
        }
        Ok(())
    }

    pub fn api_key(&self) -> Result<&str> {
        self.openai.api_key
            .as_deref()
            .ok_or_else(|| BisubError::Config(format!("{} is not set", API_KEY_ENV)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.acquire.mode, AcquisitionMode::Subtitles);
        assert_eq!(config.translate.chunk_size, 2000);
        assert_eq!(config.translate.target_language, "Simplified Chinese");
        assert_eq!(config.output.dir, PathBuf::from("downloads"));
        assert_eq!(config.openai.model, "o4-mini");
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[acquire]\nmode = \"Transcribe\"\n\n[translate]\nchunk_size = 500\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.acquire.mode, AcquisitionMode::Transcribe);
        assert_eq!(config.acquire.ytdlp_path, "yt-dlp");
        assert_eq!(config.translate.chunk_size, 500);
        assert_eq!(config.translate.target_code, "cn");
    }

    #[test]
    fn test_api_key_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.openai.api_key = Some("sk-secret".to_string());

        config.save_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("sk-secret"));

        let loaded = Config::from_file(&path).unwrap();
        assert!(loaded.openai.api_key.is_none());
        assert_eq!(loaded.translate.chunk_size, config.translate.chunk_size);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(BisubError::Config(_))));

        config.openai.api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());

        config.translate.chunk_size = 0;
        assert!(matches!(config.validate(), Err(BisubError::Config(_))));
    }

    #[test]
    fn test_unreadable_file() {
        let result = Config::from_file("/nonexistent/bisub/config.toml");
        assert!(matches!(result, Err(BisubError::Config(_))));
    }
}
