//! Transcriber port - the external speech-to-text capability.

use async_trait::async_trait;

use crate::domain::speech::{AudioClip, LanguageOption, SpeechError, TranscriptResult};

/// Turns a validated audio clip into text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe `audio`. `language` is a BCP-47 hint; `None` lets the
    /// provider detect it.
    async fn transcribe(
        &self,
        audio: &AudioClip,
        language: Option<&str>,
    ) -> Result<TranscriptResult, SpeechError>;

    /// Languages this provider accepts as hints.
    async fn supported_languages(&self) -> Result<Vec<LanguageOption>, SpeechError>;
}
