//! Application handlers.
//!
//! Orchestrate domain operations over the ports.

pub mod profile;
pub mod speech;

pub use profile::{
    assemble_view_model, AggregationError, AggregationOutcome, AggregationReport, Assembly,
    CycleResult, DashboardState, FieldDiagnostic, OutcomeKind, ProfileAggregator,
    ProfileDashboard,
};
pub use speech::{
    ListLanguagesHandler, TranscribeAudioCommand, TranscribeAudioHandler, TranscribeAudioResult,
};
