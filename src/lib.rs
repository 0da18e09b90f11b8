//! Bisub - Bilingual Subtitles for YouTube Videos
//!
//! Fetches a video's auto-generated subtitles (or transcribes its audio),
//! translates the text chunk by chunk with a hosted language model, and
//! writes the original and translated text side by side.

pub mod cli;
pub mod config;
pub mod workflow;
pub mod acquire;
pub mod translate;
pub mod subtitle;
pub mod media;
pub mod llm;
pub mod error;
