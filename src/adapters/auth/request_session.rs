//! Session backed by a single authenticated HTTP request.
//!
//! The profile overview route aggregates on behalf of its caller: the user
//! comes from the validated bearer token and the same token is forwarded to
//! the gateway.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, BearerToken};
use crate::ports::SessionProvider;

#[derive(Debug, Clone)]
pub struct RequestSession {
    user: Option<AuthenticatedUser>,
    token: Option<BearerToken>,
}

impl RequestSession {
    pub fn new(user: AuthenticatedUser, token: BearerToken) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            token: None,
        }
    }
}

#[async_trait]
impl SessionProvider for RequestSession {
    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.user.clone()
    }

    async fn id_token(&self) -> Result<BearerToken, AuthError> {
        self.token.clone().ok_or(AuthError::NoSession)
    }
}
