//! HTTP adapter for speech uploads.

mod dto;
mod handlers;
mod routes;

pub use dto::{LanguagesResponse, TranscribeResponse};
pub use handlers::{list_languages, transcribe, SpeechAppState, AUDIO_FIELD, LANGUAGE_FIELD};
pub use routes::{speech_router, MULTIPART_OVERHEAD_BYTES};
