//! Mock transcriber for testing.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::speech::{
    AudioClip, AudioFormat, LanguageOption, SpeechError, TranscriptResult,
};
use crate::ports::Transcriber;

/// One call the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscribeCall {
    pub format: AudioFormat,
    pub len: usize,
    pub language: Option<String>,
}

/// Returns a fixed transcript and records what it was asked to transcribe.
#[derive(Debug)]
pub struct MockTranscriber {
    transcript: String,
    languages: Vec<LanguageOption>,
    force_error: RwLock<Option<SpeechError>>,
    calls: RwLock<Vec<TranscribeCall>>,
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self {
            transcript: "hello world".to_string(),
            languages: vec![
                LanguageOption::new("en-US", "English (US)"),
                LanguageOption::new("es-ES", "Spanish (Spain)"),
            ],
            force_error: RwLock::new(None),
            calls: RwLock::new(Vec::new()),
        }
    }
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    pub fn with_languages(mut self, languages: Vec<LanguageOption>) -> Self {
        self.languages = languages;
        self
    }

    /// Forces every call to fail with `error`.
    pub fn with_error(self, error: SpeechError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<TranscribeCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(
        &self,
        audio: &AudioClip,
        language: Option<&str>,
    ) -> Result<TranscriptResult, SpeechError> {
        self.calls.write().unwrap().push(TranscribeCall {
            format: audio.format(),
            len: audio.len(),
            language: language.map(str::to_string),
        });

        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        Ok(TranscriptResult {
            transcript: self.transcript.clone(),
            language: language.unwrap_or("en-US").to_string(),
            confidence: Some(0.95),
        })
    }

    async fn supported_languages(&self) -> Result<Vec<LanguageOption>, SpeechError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        Ok(self.languages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_and_echoes_language() {
        let mock = MockTranscriber::new().with_transcript("feeling good");
        let clip = AudioClip::new(vec![0; 16], "audio/ogg", 1024).unwrap();

        let result = mock.transcribe(&clip, Some("es-ES")).await.unwrap();

        assert_eq!(result.transcript, "feeling good");
        assert_eq!(result.language, "es-ES");
        assert_eq!(
            mock.calls(),
            vec![TranscribeCall {
                format: AudioFormat::Ogg,
                len: 16,
                language: Some("es-ES".to_string()),
            }]
        );
    }
}
