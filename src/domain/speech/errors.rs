//! Speech upload errors.

use thiserror::Error;

use super::AudioFormat;
use crate::domain::foundation::ErrorCode;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Invalid audio format. Supported formats: {}", AudioFormat::supported_list())]
    UnsupportedFormat(String),

    #[error("Audio file is too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { size: usize, limit: usize },

    #[error("Audio file is empty")]
    EmptyAudio,

    #[error("No audio file provided")]
    MissingAudio,

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Transcription provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),
}

impl SpeechError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SpeechError::UnsupportedFormat(_) => ErrorCode::UnsupportedMediaType,
            SpeechError::TooLarge { .. } => ErrorCode::PayloadTooLarge,
            SpeechError::EmptyAudio
            | SpeechError::MissingAudio
            | SpeechError::UnsupportedLanguage(_) => ErrorCode::ValidationFailed,
            SpeechError::ProviderUnavailable(_) => ErrorCode::UpstreamUnavailable,
            SpeechError::TranscriptionFailed(_) => ErrorCode::UpstreamRejected,
        }
    }
}
