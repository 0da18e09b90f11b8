use thiserror::Error;

#[derive(Error, Debug)]
pub enum BisubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid video URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, BisubError>;
