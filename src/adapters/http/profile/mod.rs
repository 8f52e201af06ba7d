//! HTTP adapter for the profile overview.

mod dto;
mod handlers;
mod routes;

pub use dto::{OverviewQuery, OverviewResponse};
pub use handlers::{get_overview, ProfileAppState};
pub use routes::profile_router;
