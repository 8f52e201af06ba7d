//! Authentication adapters.
//!
//! - `oidc` - production bearer token validation against an OIDC issuer
//! - `request_session` - session scoped to one authenticated request
//! - `mock` - test implementations that need no identity provider

mod mock;
mod oidc;
mod request_session;

pub use mock::{test_user, MockSessionProvider, MockSessionValidator};
pub use oidc::{OidcConfig, OidcSessionValidator};
pub use request_session::RequestSession;
