//! Mock authentication adapters for testing.
//!
//! These adapters implement the `SessionValidator` and `SessionProvider`
//! ports without an identity provider.
//!
//! # Example
//!
//! ```ignore
//! use wellness_profile::adapters::auth::MockSessionProvider;
//!
//! let session = MockSessionProvider::signed_in("user-123", "token-abc");
//! assert!(session.current_user().is_some());
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, BearerToken, UserId};
use crate::ports::{SessionProvider, SessionValidator};

/// Builds the user every mock hands out for `user_id`.
pub fn test_user(user_id: &str) -> AuthenticatedUser {
    AuthenticatedUser::new(
        UserId::new(user_id).unwrap(),
        format!("{}@test.example.com", user_id),
        Some(format!("Test User {}", user_id)),
        true,
    )
}

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token with a generated test user.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        self.with_user(token, test_user(user_id))
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mock client session for driving the profile aggregator.
///
/// Identity and token can be swapped at runtime to simulate sign-in,
/// sign-out, and expiry between cycles.
#[derive(Debug, Default)]
pub struct MockSessionProvider {
    user: RwLock<Option<AuthenticatedUser>>,
    token: RwLock<String>,
    force_error: RwLock<Option<AuthError>>,
    token_delay: RwLock<Option<Duration>>,
    token_requests: AtomicUsize,
}

impl MockSessionProvider {
    /// Nobody signed in.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// `user_id` signed in, minting `token` on every request.
    pub fn signed_in(user_id: &str, token: impl Into<String>) -> Self {
        let session = Self::default();
        session.sign_in(test_user(user_id), token);
        session
    }

    /// Forces every token request to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Delays every token request.
    pub fn with_token_delay(self, delay: Duration) -> Self {
        *self.token_delay.write().unwrap() = Some(delay);
        self
    }

    pub fn sign_in(&self, user: AuthenticatedUser, token: impl Into<String>) {
        *self.user.write().unwrap() = Some(user);
        *self.token.write().unwrap() = token.into();
    }

    pub fn sign_out(&self) {
        *self.user.write().unwrap() = None;
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// How many times a credential was requested.
    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.user.read().unwrap().clone()
    }

    async fn id_token(&self) -> Result<BearerToken, AuthError> {
        self.token_requests.fetch_add(1, Ordering::SeqCst);

        let delay = *self.token_delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        if self.user.read().unwrap().is_none() {
            return Err(AuthError::NoSession);
        }

        Ok(BearerToken::new(self.token.read().unwrap().clone()))
    }
}
