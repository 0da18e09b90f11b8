// Hosted language-model services
//
// Two capabilities are consumed: chat completion (translation) and
// speech-to-text (transcription path). Both are served by the
// OpenAI-compatible client in `openai`.

pub mod openai;

use async_trait::async_trait;
use std::path::Path;

pub use openai::OpenAiClient;
use crate::error::Result;

/// Text completion by prompt
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send one system + user message pair and return the completion text
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Speech-to-text by audio file
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe an audio file to plain text
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}
