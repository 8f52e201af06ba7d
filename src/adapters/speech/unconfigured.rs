//! Transcriber used when no speech provider is configured.

use async_trait::async_trait;

use crate::domain::speech::{AudioClip, LanguageOption, SpeechError, TranscriptResult};
use crate::ports::Transcriber;

/// Accepts validated uploads but has nobody to send them to.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredTranscriber;

impl UnconfiguredTranscriber {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transcriber for UnconfiguredTranscriber {
    async fn transcribe(
        &self,
        audio: &AudioClip,
        _language: Option<&str>,
    ) -> Result<TranscriptResult, SpeechError> {
        tracing::warn!(format = %audio.format(), bytes = audio.len(), "Transcription requested but no provider is configured");
        Err(SpeechError::ProviderUnavailable(
            "speech-to-text provider is not configured".to_string(),
        ))
    }

    async fn supported_languages(&self) -> Result<Vec<LanguageOption>, SpeechError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn transcribe_reports_provider_unavailable() {
        let clip = AudioClip::new(vec![1, 2, 3], "audio/webm", 1024).unwrap();

        let err = UnconfiguredTranscriber::new()
            .transcribe(&clip, None)
            .await
            .unwrap_err();

        assert!(matches!(err, SpeechError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn advertises_no_languages() {
        let languages = UnconfiguredTranscriber::new()
            .supported_languages()
            .await
            .unwrap();
        assert!(languages.is_empty());
    }
}
