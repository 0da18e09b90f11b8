use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{info, debug};

use crate::config::TranslateConfig;
use crate::error::{Result, BisubError};
use crate::llm::CompletionService;
use super::split_into_chunks;

/// Translates text chunk by chunk, one request at a time, with no context shared between chunks
pub struct ChunkedTranslator {
    service: Arc<dyn CompletionService>,
    chunk_size: usize,
    system_prompt: String,
}

impl ChunkedTranslator {
    pub fn new(service: Arc<dyn CompletionService>, config: &TranslateConfig) -> Self {
        Self {
            service,
            chunk_size: config.chunk_size,
            system_prompt: config.system_prompt.clone(),
        }
    }

    /// Translate `text` into `target_language`; the first failing chunk aborts the rest
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let chunks = split_into_chunks(text, self.chunk_size);
        let total = chunks.len();
        info!("Translating {} chunk(s) into {}", total, target_language);

        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut translations = Vec::with_capacity(total);
        for (idx, chunk) in chunks.iter().enumerate() {
            info!("Translating chunk {}/{}...", idx + 1, total);
            debug!("Chunk {} has {} characters", idx + 1, chunk.chars().count());

            let prompt = build_translation_prompt(chunk, target_language);
            let translation = match self.service.complete(&self.system_prompt, &prompt).await {
                Ok(translation) => translation,
                Err(e) => {
                    progress.abandon();
                    return Err(BisubError::Translation(format!(
                        "chunk {}/{} failed: {}",
                        idx + 1,
                        total,
                        e
                    )));
                }
            };

            translations.push(translation);
            progress.inc(1);
        }

        progress.finish_and_clear();
        info!("Translation completed ({} chunk(s))", total);
        Ok(translations.join("\n"))
    }
}

/// User prompt for a single chunk
pub fn build_translation_prompt(chunk: &str, target_language: &str) -> String {
    format!(
        "Translate the following text into {}.\n\
         Keep the original format, and only translate the text: no extra information, \
         no code blocks, no markdown, no quotes, no explanations.\n\
         Ensure the entire content is translated without skipping any parts:\n\n\
         {}",
        target_language, chunk
    )
}
