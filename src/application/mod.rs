//! Application layer - handlers that coordinate domain logic and ports.

pub mod handlers;

pub use handlers::{
    AggregationOutcome, AggregationReport, CycleResult, DashboardState, ProfileAggregator,
    ProfileDashboard,
};
