//! ListLanguagesHandler - languages the configured provider accepts.

use std::sync::Arc;

use crate::domain::speech::{LanguageOption, SpeechError};
use crate::ports::Transcriber;

pub struct ListLanguagesHandler {
    transcriber: Arc<dyn Transcriber>,
}

impl ListLanguagesHandler {
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self { transcriber }
    }

    pub async fn handle(&self) -> Result<Vec<LanguageOption>, SpeechError> {
        self.transcriber.supported_languages().await
    }
}
