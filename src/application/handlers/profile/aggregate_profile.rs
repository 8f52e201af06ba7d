//! ProfileAggregator - one aggregation cycle from session to view-model.
//!
//! Fans out seven concurrent requests, gates on transport success, then
//! hands the raw responses to [`assemble_view_model`].

use std::sync::Arc;

use futures::future::join_all;
use tracing::Instrument;

use crate::domain::foundation::{BearerToken, CycleId};
use crate::domain::profile::{EndpointRequest, ProfileEndpoint, ProfileViewModel, ReportingPeriod};
use crate::ports::{ProfileGateway, RawResponse, SessionProvider};

use super::assemble::{assemble_view_model, Assembly};
use super::errors::{AggregationError, AggregationOutcome, FieldDiagnostic};

/// Everything one cycle produced.
#[derive(Debug, Clone)]
pub struct AggregationReport {
    pub cycle_id: CycleId,
    pub period: ReportingPeriod,
    pub outcome: AggregationOutcome,
    pub view: ProfileViewModel,
    pub diagnostics: Vec<FieldDiagnostic>,
}

impl AggregationReport {
    fn finished(cycle_id: CycleId, period: ReportingPeriod, outcome: AggregationOutcome) -> Self {
        Self {
            cycle_id,
            period,
            outcome,
            view: ProfileViewModel::default(),
            diagnostics: Vec::new(),
        }
    }
}

/// Runs aggregation cycles against a [`ProfileGateway`].
pub struct ProfileAggregator {
    gateway: Arc<dyn ProfileGateway>,
}

impl ProfileAggregator {
    pub fn new(gateway: Arc<dyn ProfileGateway>) -> Self {
        Self { gateway }
    }

    /// Runs one cycle for whoever `session` says is signed in.
    ///
    /// Never fails: every error is folded into the report's outcome with a
    /// fully reset view-model.
    pub async fn aggregate(
        &self,
        session: &dyn SessionProvider,
        period: ReportingPeriod,
    ) -> AggregationReport {
        let cycle_id = CycleId::new();
        let span = tracing::info_span!("profile_aggregation", cycle_id = %cycle_id, period = %period);

        self.run_cycle(cycle_id, session, period)
            .instrument(span)
            .await
    }

    async fn run_cycle(
        &self,
        cycle_id: CycleId,
        session: &dyn SessionProvider,
        period: ReportingPeriod,
    ) -> AggregationReport {
        if session.current_user().is_none() {
            tracing::warn!("No user signed in, skipping profile refresh");
            return AggregationReport::finished(cycle_id, period, AggregationOutcome::SignedOut);
        }

        match self.collect(session, period).await {
            Ok(Assembly { view, diagnostics }) => AggregationReport {
                cycle_id,
                period,
                outcome: AggregationOutcome::Complete,
                view,
                diagnostics,
            },
            Err(err) => {
                match &err {
                    AggregationError::Transport { endpoint, status } => {
                        tracing::warn!(endpoint = %endpoint, status, "Profile endpoint failed, discarding cycle");
                    }
                    other => {
                        tracing::error!(error = %other, "Profile aggregation failed");
                    }
                }
                AggregationReport::finished(cycle_id, period, AggregationOutcome::Degraded(err))
            }
        }
    }

    async fn collect(
        &self,
        session: &dyn SessionProvider,
        period: ReportingPeriod,
    ) -> Result<Assembly, AggregationError> {
        let token = session.id_token().await?;
        let responses = self.fetch_all(period, &token).await?;
        assemble_view_model(&responses)
    }

    /// Issues all seven requests concurrently and waits for every one.
    ///
    /// Returns the first gateway error in endpoint order if any request
    /// produced no response.
    pub async fn fetch_all(
        &self,
        period: ReportingPeriod,
        token: &BearerToken,
    ) -> Result<Vec<RawResponse>, AggregationError> {
        let requests: Vec<EndpointRequest> = ProfileEndpoint::ALL
            .iter()
            .map(|&endpoint| EndpointRequest::new(endpoint, period))
            .collect();

        let results = join_all(
            requests
                .iter()
                .map(|request| self.gateway.fetch(request, token)),
        )
        .await;

        results
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(AggregationError::from)
    }
}
