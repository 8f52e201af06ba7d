//! Speech-to-text adapters implementing the `Transcriber` port.

mod mock;
mod unconfigured;

pub use mock::{MockTranscriber, TranscribeCall};
pub use unconfigured::UnconfiguredTranscriber;
