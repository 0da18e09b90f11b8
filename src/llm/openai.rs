use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::error::{Result, BisubError};
use super::{CompletionService, SpeechToText};

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatRequestMessage<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequestMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice; missing or blank content is a failure
    pub fn into_content(self) -> Result<String> {
        let content = self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| BisubError::Translation("Completion response has no message content".to_string()))?;

        if content.trim().is_empty() {
            return Err(BisubError::Translation("Empty translation received".to_string()));
        }
        Ok(content)
    }
}

/// Client for an OpenAI-compatible HTTP API
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    transcription_model: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            transcription_model: config.transcription_model.clone(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatRequestMessage { role: "system", content: system_prompt },
                ChatRequestMessage { role: "user", content: user_prompt },
            ],
        };

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Sending completion request to: {}", url);

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| BisubError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BisubError::Translation(format!(
                "Completion API error {}: {}", status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await
            .map_err(|e| BisubError::Translation(format!("Failed to parse response: {}", e)))?;

        chat_response.into_content()
    }
}

#[async_trait]
impl SpeechToText for OpenAiClient {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.transcription_model.clone())
            .text("response_format", "text");

        let url = format!("{}/audio/transcriptions", self.endpoint);
        debug!("Sending transcription request to: {}", url);

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BisubError::Transcription(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BisubError::Transcription(format!(
                "Transcription API error {}: {}", status, error_text
            )));
        }

        let transcript = response.text().await
            .map_err(|e| BisubError::Transcription(format!("Failed to read response: {}", e)))?;

        if transcript.trim().is_empty() {
            return Err(BisubError::Transcription("Empty transcript received".to_string()));
        }
        Ok(transcript)
    }
}
