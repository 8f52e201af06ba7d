//! Profile aggregation handlers.
//!
//! - `assemble` - pure normalization of raw responses into a view-model
//! - `aggregate_profile` - one concurrent fetch cycle
//! - `dashboard` - stateful holder with cancellation and fencing

mod aggregate_profile;
mod assemble;
mod dashboard;
mod errors;

pub use aggregate_profile::{AggregationReport, ProfileAggregator};
pub use assemble::{assemble_view_model, Assembly};
pub use dashboard::{CycleResult, DashboardState, ProfileDashboard};
pub use errors::{AggregationError, AggregationOutcome, FieldDiagnostic, OutcomeKind};
