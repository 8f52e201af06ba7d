//! Audio upload configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::speech::MAX_AUDIO_BYTES;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// May be lowered below 10 MiB, never raised above it
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,
}

impl UploadConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_audio_bytes == 0 || self.max_audio_bytes > MAX_AUDIO_BYTES {
            return Err(ValidationError::InvalidUploadLimit {
                max: MAX_AUDIO_BYTES,
            });
        }
        Ok(())
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_audio_bytes: default_max_audio_bytes(),
        }
    }
}

fn default_max_audio_bytes() -> usize {
    MAX_AUDIO_BYTES
}
