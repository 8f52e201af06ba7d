//! Session provider port - who is signed in, and a fresh credential for them.
//!
//! The profile aggregator never caches credentials: it asks for a new token
//! at the start of every cycle, so an expired token only ever costs one
//! failed cycle.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, BearerToken};

/// Supplies the current identity and a bearer credential on demand.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The signed-in user, or `None` when nobody is authenticated.
    fn current_user(&self) -> Option<AuthenticatedUser>;

    /// Obtain a bearer credential for the current user.
    ///
    /// # Errors
    ///
    /// * `AuthError::NoSession` - nobody is signed in
    /// * `AuthError::TokenExpired` - the session can no longer mint tokens
    /// * `AuthError::ServiceUnavailable` - identity provider unreachable
    async fn id_token(&self) -> Result<BearerToken, AuthError>;
}
