//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `SessionProvider` - current identity and a fresh bearer credential
//! - `ProfileGateway` - transport to the seven profile endpoints
//! - `SessionValidator` - validates bearer tokens on this service's routes
//! - `Transcriber` - external speech-to-text provider

mod profile_gateway;
mod session_provider;
mod session_validator;
mod transcriber;

pub use profile_gateway::{GatewayError, ProfileGateway, RawResponse};
pub use session_provider::SessionProvider;
pub use session_validator::SessionValidator;
pub use transcriber::Transcriber;
