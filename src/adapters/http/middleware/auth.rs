//! Authentication middleware and extractors for axum.
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser + BearerToken in extensions
//!                                      ↓
//!                   Handler → RequireAuth / RequireSession read them back
//! ```
//!
//! The middleware only depends on the `SessionValidator` port, so the OIDC
//! validator and the test mock are interchangeable.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::auth::RequestSession;
use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser, BearerToken, ErrorCode};
use crate::ports::SessionValidator;

pub type AuthState = Arc<dyn SessionValidator>;

/// Validates `Authorization: Bearer <token>` when present.
///
/// Requests without a token pass through untouched; handlers decide whether
/// authentication is required. An invalid token is rejected immediately.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(BearerToken::new);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token.expose()).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Request authenticated");
            request.extensions_mut().insert(user);
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        Err(e) => reject(e),
    }
}

fn reject(error: AuthError) -> Response {
    match error {
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(error = %msg, "Auth service unavailable");
            ErrorResponse::new(
                ErrorCode::UpstreamUnavailable,
                "Authentication service unavailable",
            )
            .with_status(StatusCode::SERVICE_UNAVAILABLE)
        }
        AuthError::TokenExpired => ErrorResponse::new(ErrorCode::Unauthorized, "Token expired")
            .with_status(StatusCode::UNAUTHORIZED),
        _ => ErrorResponse::new(ErrorCode::Unauthorized, "Invalid token")
            .with_status(StatusCode::UNAUTHORIZED),
    }
}

/// Extractor that requires an authenticated user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor yielding a [`RequestSession`] that forwards the caller's token.
#[derive(Debug, Clone)]
pub struct RequireSession(pub RequestSession);

impl<S> axum::extract::FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            let token = parts.extensions.get::<BearerToken>().cloned();
            match (user, token) {
                (Some(user), Some(token)) => Ok(RequireSession(RequestSession::new(user, token))),
                _ => Err(AuthRejection::Unauthenticated),
            }
        })
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => {
                ErrorResponse::new(ErrorCode::Unauthorized, "Authentication required")
                    .with_status(StatusCode::UNAUTHORIZED)
            }
        }
    }
}
