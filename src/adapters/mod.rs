//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - OIDC token validation and session providers
//! - `gateway` - transport to the profile endpoints (reqwest, mock)
//! - `speech` - speech-to-text providers
//! - `http` - axum routes exposing the application

pub mod auth;
pub mod gateway;
pub mod http;
pub mod speech;

pub use auth::{MockSessionProvider, MockSessionValidator, OidcSessionValidator, RequestSession};
pub use gateway::{HttpProfileGateway, MockProfileGateway};
pub use speech::{MockTranscriber, UnconfiguredTranscriber};
