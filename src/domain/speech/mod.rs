//! Speech module - audio uploads bound for an external speech-to-text provider.

mod audio;
mod errors;
mod transcript;

pub use audio::{AudioClip, AudioFormat, MAX_AUDIO_BYTES};
pub use errors::SpeechError;
pub use transcript::{LanguageOption, TranscriptResult};
