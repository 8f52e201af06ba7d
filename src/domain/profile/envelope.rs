//! Response envelope shared by every profile endpoint.
//!
//! Bodies look like `{ "success": bool, "<field>": <payload>, "error"?: string }`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Parsed response body, payload still untyped.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Application-level success flag. Missing counts as failure.
    #[serde(default)]
    pub success: bool,

    /// Server-provided failure reason.
    #[serde(default)]
    pub error: Option<String>,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Envelope {
    /// Parses a raw response body.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Extracts the named payload field.
    ///
    /// An absent or `null` field yields `T::default()`; a present field of the
    /// wrong shape is an error.
    pub fn payload<T>(&self, field: &str) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned + Default,
    {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => T::deserialize(value),
        }
    }

    /// Failure reason for diagnostics, with a fallback when the server gave none.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("no error message provided")
    }
}
