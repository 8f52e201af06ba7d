//! Uploaded audio clips and the format allow-list.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::SpeechError;

/// Hard ceiling on uploaded audio, 10 MiB.
pub const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

/// Audio containers accepted for transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    WebM,
    Mp4,
    Wav,
    Flac,
    Ogg,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 5] = [
        AudioFormat::WebM,
        AudioFormat::Mp4,
        AudioFormat::Wav,
        AudioFormat::Flac,
        AudioFormat::Ogg,
    ];

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::WebM => "audio/webm",
            AudioFormat::Mp4 => "audio/mp4",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Ogg => "audio/ogg",
        }
    }

    /// Short name used in user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            AudioFormat::WebM => "WebM",
            AudioFormat::Mp4 => "MP4",
            AudioFormat::Wav => "WAV",
            AudioFormat::Flac => "FLAC",
            AudioFormat::Ogg => "OGG",
        }
    }

    /// "WebM, MP4, WAV, FLAC, OGG"
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|f| f.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

impl FromStr for AudioFormat {
    type Err = SpeechError;

    /// Parses a MIME type, ignoring parameters such as `;codecs=opus`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|format| format.mime_type() == essence)
            .ok_or_else(|| SpeechError::UnsupportedFormat(s.to_string()))
    }
}

/// A validated audio upload held in memory.
#[derive(Clone)]
pub struct AudioClip {
    bytes: Vec<u8>,
    format: AudioFormat,
    file_name: Option<String>,
}

impl AudioClip {
    /// Validates an upload against the allow-list and `max_bytes`.
    ///
    /// `max_bytes` is clamped to [`MAX_AUDIO_BYTES`].
    pub fn new(
        bytes: Vec<u8>,
        mime_type: &str,
        max_bytes: usize,
    ) -> Result<Self, SpeechError> {
        let format: AudioFormat = mime_type.parse()?;

        if bytes.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        let limit = max_bytes.min(MAX_AUDIO_BYTES);
        if bytes.len() > limit {
            return Err(SpeechError::TooLarge {
                size: bytes.len(),
                limit,
            });
        }

        Ok(Self {
            bytes,
            format,
            file_name: None,
        })
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .field("file_name", &self.file_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_every_allowed_mime_type() {
        for format in AudioFormat::ALL {
            assert_eq!(format.mime_type().parse::<AudioFormat>().unwrap(), format);
        }
    }

    #[test]
    fn ignores_codec_parameters_and_case() {
        assert_eq!(
            "Audio/WebM; codecs=opus".parse::<AudioFormat>().unwrap(),
            AudioFormat::WebM
        );
    }

    #[test]
    fn rejects_other_mime_types_with_supported_list() {
        let err = "audio/mpeg".parse::<AudioFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid audio format. Supported formats: WebM, MP4, WAV, FLAC, OGG"
        );
    }

    #[test]
    fn clip_rejects_empty_payload() {
        let err = AudioClip::new(vec![], "audio/wav", MAX_AUDIO_BYTES).unwrap_err();
        assert!(matches!(err, SpeechError::EmptyAudio));
    }

    #[test]
    fn clip_rejects_oversize_payload() {
        let err = AudioClip::new(vec![0; 11], "audio/wav", 10).unwrap_err();
        assert!(matches!(err, SpeechError::TooLarge { size: 11, limit: 10 }));
    }

    #[test]
    fn clip_limit_never_exceeds_hard_cap() {
        let err = AudioClip::new(vec![0; MAX_AUDIO_BYTES + 1], "audio/ogg", usize::MAX).unwrap_err();
        assert!(matches!(err, SpeechError::TooLarge { limit: MAX_AUDIO_BYTES, .. }));
    }

    #[test]
    fn clip_keeps_format_and_name() {
        let clip = AudioClip::new(vec![1, 2, 3], "audio/flac", MAX_AUDIO_BYTES)
            .unwrap()
            .with_file_name("note.flac");
        assert_eq!(clip.format(), AudioFormat::Flac);
        assert_eq!(clip.file_name(), Some("note.flac"));
        assert_eq!(clip.len(), 3);
    }

    proptest! {
        #[test]
        fn non_audio_mime_types_are_rejected(subtype in "[a-z]{1,12}") {
            let mime = format!("application/{}", subtype);
            prop_assert!(mime.parse::<AudioFormat>().is_err());
        }

        #[test]
        fn clips_within_limit_are_accepted(len in 1usize..4096) {
            let clip = AudioClip::new(vec![7; len], "audio/webm", 4096);
            prop_assert!(clip.is_ok());
        }
    }
}
