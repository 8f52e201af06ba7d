//! Speech upload handlers.

mod list_languages;
mod transcribe_audio;

pub use list_languages::ListLanguagesHandler;
pub use transcribe_audio::{TranscribeAudioCommand, TranscribeAudioHandler, TranscribeAudioResult};
