//! HTTP DTOs for the profile overview.

use serde::{Deserialize, Serialize};

use crate::application::handlers::profile::{AggregationReport, FieldDiagnostic, OutcomeKind};
use crate::domain::foundation::CycleId;
use crate::domain::profile::{ProfileViewModel, ReportingPeriod};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewQuery {
    pub period: Option<String>,
}

/// Body of `GET /api/profile/overview`.
///
/// `loading` is always false: the server answers once the cycle is over.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub success: bool,
    pub outcome: OutcomeKind,
    pub loading: bool,
    pub period: ReportingPeriod,
    pub cycle_id: CycleId,
    pub profile: ProfileViewModel,
    pub diagnostics: Vec<FieldDiagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<AggregationReport> for OverviewResponse {
    fn from(report: AggregationReport) -> Self {
        let kind = report.outcome.kind();
        Self {
            success: kind != OutcomeKind::Degraded,
            outcome: kind,
            loading: false,
            period: report.period,
            cycle_id: report.cycle_id,
            error: report.outcome.error().map(|e| e.to_string()),
            profile: report.view,
            diagnostics: report.diagnostics,
        }
    }
}
