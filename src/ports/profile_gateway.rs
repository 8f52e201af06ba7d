//! Profile gateway port - transport to the seven profile endpoints.
//!
//! The gateway only moves bytes. Status interpretation (transport-ok) and
//! body parsing belong to the aggregator, so a mock gateway can script any
//! combination of statuses and bodies.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{BearerToken, ErrorCode};
use crate::domain::profile::{EndpointRequest, ProfileEndpoint};

/// Raw response from one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub endpoint: ProfileEndpoint,
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(endpoint: ProfileEndpoint, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            endpoint,
            status,
            body: body.into(),
        }
    }

    /// The request reached the server and came back with a 2xx status.
    pub fn is_transport_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures that prevented any response from arriving.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: ProfileEndpoint },

    #[error("Request to {endpoint} failed: {message}")]
    Network {
        endpoint: ProfileEndpoint,
        message: String,
    },

    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    pub fn network(endpoint: ProfileEndpoint, message: impl Into<String>) -> Self {
        Self::Network {
            endpoint,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Timeout { .. } | GatewayError::Network { .. } => {
                ErrorCode::UpstreamUnavailable
            }
            GatewayError::InvalidUrl(_) => ErrorCode::InternalError,
        }
    }
}

/// Issues a single authenticated `GET` against a profile endpoint.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetch one endpoint. Non-2xx statuses are returned as `Ok`; only
    /// failures to obtain a response are errors.
    async fn fetch(
        &self,
        request: &EndpointRequest,
        token: &BearerToken,
    ) -> Result<RawResponse, GatewayError>;
}
