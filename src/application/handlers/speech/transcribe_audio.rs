//! TranscribeAudioHandler - validates an upload and hands it to the provider.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::domain::speech::{AudioClip, SpeechError, TranscriptResult, MAX_AUDIO_BYTES};
use crate::ports::Transcriber;

/// Command carrying one uploaded file.
#[derive(Debug, Clone)]
pub struct TranscribeAudioCommand {
    pub bytes: Vec<u8>,
    /// Content type the client declared for the file.
    pub mime_type: String,
    pub file_name: Option<String>,
    /// Optional BCP-47 hint, e.g. `en-US`.
    pub language: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TranscribeAudioResult {
    pub transcript: TranscriptResult,
    pub processing_time: Duration,
    pub completed_at: DateTime<Utc>,
}

pub struct TranscribeAudioHandler {
    transcriber: Arc<dyn Transcriber>,
    max_bytes: usize,
}

impl TranscribeAudioHandler {
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            transcriber,
            max_bytes: MAX_AUDIO_BYTES,
        }
    }

    /// Lowers the size cap. Values above 10 MiB are clamped.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes.min(MAX_AUDIO_BYTES);
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn handle(
        &self,
        cmd: TranscribeAudioCommand,
    ) -> Result<TranscribeAudioResult, SpeechError> {
        let started = Instant::now();

        let language = match cmd.language.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(tag) if is_language_tag(tag) => Some(tag.to_string()),
            Some(tag) => return Err(SpeechError::UnsupportedLanguage(tag.to_string())),
        };

        let mut clip = AudioClip::new(cmd.bytes, &cmd.mime_type, self.max_bytes)?;
        if let Some(name) = cmd.file_name {
            clip = clip.with_file_name(name);
        }

        tracing::info!(
            format = %clip.format(),
            bytes = clip.len(),
            language = language.as_deref().unwrap_or("auto"),
            "Transcribing audio upload"
        );

        let transcript = self
            .transcriber
            .transcribe(&clip, language.as_deref())
            .await?;

        Ok(TranscribeAudioResult {
            transcript,
            processing_time: started.elapsed(),
            completed_at: Utc::now(),
        })
    }
}

/// Loose BCP-47 shape check: alphanumeric subtags joined by `-`.
fn is_language_tag(tag: &str) -> bool {
    tag.len() <= 35
        && tag
            .split('-')
            .all(|part| !part.is_empty() && part.len() <= 8 && part.chars().all(|c| c.is_ascii_alphanumeric()))
}
