//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, auth value objects, errors)
//! - `profile` - Reporting periods, endpoint contract and the profile view-model
//! - `speech` - Audio upload validation and transcription results
//! - `exercise` - Built-in guided exercise catalog

pub mod exercise;
pub mod foundation;
pub mod profile;
pub mod speech;
