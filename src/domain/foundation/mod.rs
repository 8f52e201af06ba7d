//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, authentication value objects and error types that
//! form the vocabulary of the wellness profile domain.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, AuthenticatedUser, BearerToken};
pub use errors::{ErrorCode, ValidationError};
pub use ids::{CycleId, UserId};
