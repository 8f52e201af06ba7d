//! HTTP routes for the profile overview.

use axum::{routing::get, Router};

use super::handlers::{get_overview, ProfileAppState};

pub fn profile_router() -> Router<ProfileAppState> {
    Router::new().route("/overview", get(get_overview))
}
