//! HTTP routes for speech uploads.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::timing_middleware;

use super::handlers::{list_languages, transcribe, SpeechAppState};

/// Headroom for multipart boundaries, part headers, and the language field.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn speech_router(max_audio_bytes: usize) -> Router<SpeechAppState> {
    Router::new()
        .route(
            "/transcribe",
            post(transcribe).layer(DefaultBodyLimit::max(
                max_audio_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route("/languages", get(list_languages))
        .layer(middleware::from_fn(timing_middleware))
}
