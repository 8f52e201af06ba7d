//! GET /api/exercises - the static guided-exercise catalog.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::domain::exercise::{catalog, ExerciseCatalog};

#[derive(Debug, Serialize)]
pub struct ExercisesResponse {
    pub success: bool,
    pub exercises: &'static ExerciseCatalog,
}

pub async fn list_exercises() -> Json<ExercisesResponse> {
    Json(ExercisesResponse {
        success: true,
        exercises: catalog(),
    })
}

pub fn exercises_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(list_exercises))
}
