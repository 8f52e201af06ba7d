//! HTTP middleware for axum.
//!
//! - `auth` - bearer token validation and the auth extractors
//! - `timing` - per-request elapsed time logging

pub mod auth;
pub mod timing;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth, RequireSession};
pub use timing::{timing_middleware, RESPONSE_TIME_HEADER};
