//! Aggregation cycle errors and outcomes.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::{AuthError, ErrorCode};
use crate::domain::profile::ProfileEndpoint;
use crate::ports::GatewayError;

/// Why an aggregation cycle produced the reset view-model.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// The session could not mint a bearer credential.
    #[error("Failed to obtain credential: {0}")]
    Credential(#[from] AuthError),

    /// An endpoint answered with a non-2xx status. Gates the whole cycle.
    #[error("{endpoint} returned status {status}")]
    Transport {
        endpoint: ProfileEndpoint,
        status: u16,
    },

    /// No response arrived at all (network error, timeout).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A response body was not the expected JSON shape.
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedBody {
        endpoint: ProfileEndpoint,
        message: String,
    },

    /// The gateway returned nothing for an endpoint.
    #[error("No response from {0}")]
    MissingResponse(ProfileEndpoint),
}

impl AggregationError {
    pub fn malformed(endpoint: ProfileEndpoint, err: serde_json::Error) -> Self {
        Self::MalformedBody {
            endpoint,
            message: err.to_string(),
        }
    }

    /// Transport-level gating failure, as opposed to a cycle-level exception.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, AggregationError::Transport { .. })
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AggregationError::Credential(_) => ErrorCode::Unauthorized,
            AggregationError::Transport { .. } => ErrorCode::UpstreamRejected,
            AggregationError::Gateway(e) => e.code(),
            AggregationError::MalformedBody { .. } | AggregationError::MissingResponse(_) => {
                ErrorCode::UpstreamRejected
            }
        }
    }
}

/// Per-field application failure: the endpoint answered but said `success: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiagnostic {
    pub endpoint: ProfileEndpoint,
    pub message: String,
}

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationOutcome {
    /// All seven endpoints were transport-ok; fields populated independently.
    Complete,
    /// Nobody signed in; nothing was fetched.
    SignedOut,
    /// The cycle failed as a whole; the view-model is fully reset.
    Degraded(AggregationError),
}

impl AggregationOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            AggregationOutcome::Complete => OutcomeKind::Complete,
            AggregationOutcome::SignedOut => OutcomeKind::SignedOut,
            AggregationOutcome::Degraded(_) => OutcomeKind::Degraded,
        }
    }

    pub fn error(&self) -> Option<&AggregationError> {
        match self {
            AggregationOutcome::Degraded(err) => Some(err),
            _ => None,
        }
    }
}

/// Serializable summary of an [`AggregationOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Complete,
    SignedOut,
    Degraded,
}
