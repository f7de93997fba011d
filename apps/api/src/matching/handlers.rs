//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::query::{
    parse_filter, parse_flag, query, QueryCriteria, ScoredJob, SortKey,
};
use crate::session::{resolve_session, SessionQuery};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Raw query-string selectors. Unknown values are ignored rather than rejected.
#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    pub session: Option<String>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub mode: Option<String>,
    pub experience: Option<String>,
    pub source: Option<String>,
    pub sort: Option<String>,
    pub only_matches: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    /// Lets clients decide whether to offer match sorting and the threshold toggle.
    pub has_preferences: bool,
    pub min_match_score: u8,
    pub sort: SortKey,
    pub total: usize,
    pub jobs: Vec<ScoredJob>,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub job: ScoredJob,
    pub saved: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
///
/// Scores the whole catalog against the session's preferences, then filters
/// and sorts.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobsResponse>, AppError> {
    let session = resolve_session(params.session.as_deref());
    let preferences = state.preferences.load(session).await;

    let criteria = QueryCriteria {
        search_term: params.search.clone().unwrap_or_default(),
        location: parse_filter("location", params.location.as_deref()),
        mode: parse_filter("mode", params.mode.as_deref()),
        experience: parse_filter("experience", params.experience.as_deref()),
        source: parse_filter("source", params.source.as_deref()),
        sort_key: SortKey::parse_or_default(params.sort.as_deref()),
        restrict_to_threshold: parse_flag("only_matches", params.only_matches.as_deref()),
        preferences,
    };

    let jobs = query(state.catalog.jobs(), &criteria, state.scorer.as_ref());

    Ok(Json(JobsResponse {
        has_preferences: criteria.preferences.has_preferences(),
        min_match_score: criteria.preferences.min_match_score,
        sort: criteria.sort_key,
        total: jobs.len(),
        jobs,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<u32>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let job = state
        .catalog
        .get(job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let preferences = state.preferences.load(params.id()).await;
    let saved = state.saved.load(params.id()).await.contains(&job_id);

    Ok(Json(JobDetailResponse {
        job: ScoredJob::new(job, &preferences, state.scorer.as_ref()),
        saved,
    }))
}
