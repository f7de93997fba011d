use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::query::ScoredJob;
use crate::saved::store::ToggleOutcome;
use crate::session::SessionQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SavedJobsResponse {
    pub ids: Vec<u32>,
    /// Saved jobs still present in the catalog, scored for the current preferences.
    pub jobs: Vec<ScoredJob>,
}

/// GET /api/v1/saved
pub async fn handle_list_saved(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<SavedJobsResponse>, AppError> {
    let ids = state.saved.load(params.id()).await;
    let preferences = state.preferences.load(params.id()).await;

    let jobs = ids
        .iter()
        .filter_map(|id| state.catalog.get(*id))
        .map(|job| ScoredJob::new(job, &preferences, state.scorer.as_ref()))
        .collect();

    Ok(Json(SavedJobsResponse {
        ids: ids.into_iter().collect(),
        jobs,
    }))
}

/// POST /api/v1/saved/:id/toggle
///
/// Ids not in the catalog come back with `changed: false`.
pub async fn handle_toggle_saved(
    State(state): State<AppState>,
    Path(job_id): Path<u32>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<ToggleOutcome>, AppError> {
    let outcome = state
        .saved
        .toggle(params.id(), job_id, &state.catalog)
        .await?;
    Ok(Json(outcome))
}
