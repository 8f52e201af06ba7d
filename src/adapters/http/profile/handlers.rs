//! HTTP handlers for the profile overview.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireSession;
use crate::application::handlers::profile::ProfileAggregator;
use crate::domain::foundation::ErrorCode;
use crate::domain::profile::ReportingPeriod;

use super::dto::{OverviewQuery, OverviewResponse};

#[derive(Clone)]
pub struct ProfileAppState {
    pub aggregator: Arc<ProfileAggregator>,
}

impl ProfileAppState {
    pub fn new(aggregator: Arc<ProfileAggregator>) -> Self {
        Self { aggregator }
    }
}

/// GET /api/profile/overview?period=week|month|year
///
/// Runs one aggregation cycle with the caller's own credential.
pub async fn get_overview(
    State(state): State<ProfileAppState>,
    RequireSession(session): RequireSession,
    Query(query): Query<OverviewQuery>,
) -> Response {
    let period = match query.period.as_deref() {
        None => ReportingPeriod::default(),
        Some(raw) => match ReportingPeriod::from_str(raw) {
            Ok(period) => period,
            Err(e) => {
                return ErrorResponse::new(ErrorCode::ValidationFailed, e.to_string())
                    .with_status(StatusCode::BAD_REQUEST)
            }
        },
    };

    let report = state.aggregator.aggregate(&session, period).await;
    (StatusCode::OK, Json(OverviewResponse::from(report))).into_response()
}
