//! Profile module - the wellness dashboard's data model.
//!
//! Contains the reporting period, the endpoint contract the dashboard reads
//! from, the response envelope, and the view-model handed to renderers.

mod endpoint;
mod envelope;
pub mod lenient;
mod period;
mod stats;
mod view_model;

pub use endpoint::{EndpointRequest, ProfileEndpoint, RECENT_ACTIVITY_LIMIT};
pub use envelope::Envelope;
pub use period::ReportingPeriod;
pub use stats::{
    derived_stats, ReportedStats, StatCard, StatIcon, AI_CONVERSATIONS_LABEL,
    JOURNAL_ENTRIES_LABEL,
};
pub use view_model::{
    ActivityDistribution, ActivityId, DistributionPayload, ActivityItem, ActivityKind, MoodPoint, Points,
    Preferences, ProfileViewModel,
};
