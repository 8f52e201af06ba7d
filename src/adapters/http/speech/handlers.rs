//! HTTP handlers for speech uploads.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::speech::{
    ListLanguagesHandler, TranscribeAudioCommand, TranscribeAudioHandler,
};
use crate::domain::foundation::ErrorCode;
use crate::domain::speech::SpeechError;

use super::dto::{LanguagesResponse, TranscribeResponse};

/// Multipart field carrying the audio file.
pub const AUDIO_FIELD: &str = "audio";
/// Optional multipart field carrying a language hint.
pub const LANGUAGE_FIELD: &str = "language";

#[derive(Clone)]
pub struct SpeechAppState {
    pub transcribe_handler: Arc<TranscribeAudioHandler>,
    pub languages_handler: Arc<ListLanguagesHandler>,
}

impl SpeechAppState {
    pub fn new(
        transcribe_handler: Arc<TranscribeAudioHandler>,
        languages_handler: Arc<ListLanguagesHandler>,
    ) -> Self {
        Self {
            transcribe_handler,
            languages_handler,
        }
    }
}

/// POST /api/speech/transcribe
pub async fn transcribe(
    State(state): State<SpeechAppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Response {
    let mut audio: Option<(Vec<u8>, String, Option<String>)> = None;
    let mut language = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_error(e),
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(AUDIO_FIELD) => {
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let file_name = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => audio = Some((bytes.to_vec(), mime, file_name)),
                    Err(e) => return multipart_error(e),
                }
            }
            Some(LANGUAGE_FIELD) => match field.text().await {
                Ok(text) => language = Some(text),
                Err(e) => return multipart_error(e),
            },
            _ => {}
        }
    }

    let Some((bytes, mime_type, file_name)) = audio else {
        return speech_error(SpeechError::MissingAudio);
    };

    tracing::debug!(user_id = %user.id, bytes = bytes.len(), mime = %mime_type, "Received audio upload");

    let cmd = TranscribeAudioCommand {
        bytes,
        mime_type,
        file_name,
        language,
    };

    match state.transcribe_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(TranscribeResponse::from(result))).into_response(),
        Err(e) => speech_error(e),
    }
}

/// GET /api/speech/languages
pub async fn list_languages(
    State(state): State<SpeechAppState>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    match state.languages_handler.handle().await {
        Ok(languages) => (
            StatusCode::OK,
            Json(LanguagesResponse {
                success: true,
                languages,
            }),
        )
            .into_response(),
        Err(e) => speech_error(e),
    }
}

fn speech_error(error: SpeechError) -> Response {
    let code = error.code();
    match &error {
        SpeechError::ProviderUnavailable(_) | SpeechError::TranscriptionFailed(_) => {
            tracing::error!(error = %error, "Transcription failed");
        }
        _ => tracing::warn!(error = %error, "Rejected audio upload"),
    }
    ErrorResponse::new(code, error.to_string()).with_status(status_for(code))
}

fn multipart_error(error: MultipartError) -> Response {
    let status = error.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        ErrorCode::PayloadTooLarge
    } else {
        ErrorCode::ValidationFailed
    };
    tracing::warn!(error = %error.body_text(), "Malformed multipart upload");
    ErrorResponse::new(code, error.body_text()).with_status(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_errors_map_to_upload_statuses() {
        assert_eq!(
            speech_error(SpeechError::UnsupportedFormat("audio/mpeg".into())).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            speech_error(SpeechError::TooLarge { size: 2, limit: 1 }).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            speech_error(SpeechError::MissingAudio).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            speech_error(SpeechError::ProviderUnavailable("x".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
