//! HTTP DTOs for speech uploads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::handlers::speech::TranscribeAudioResult;
use crate::domain::speech::LanguageOption;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub success: bool,
    pub transcript: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl From<TranscribeAudioResult> for TranscribeResponse {
    fn from(result: TranscribeAudioResult) -> Self {
        Self {
            success: true,
            transcript: result.transcript.transcript,
            language: result.transcript.language,
            confidence: result.transcript.confidence,
            processing_time_ms: result.processing_time.as_millis() as u64,
            timestamp: result.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: Vec<LanguageOption>,
}
