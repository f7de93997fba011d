use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use tracing::info;

use crate::digest::{generate_digest, Digest};
use crate::errors::AppError;
use crate::matching::query::parse_flag;
use crate::session::resolve_session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DigestQuery {
    pub session: Option<String>,
    pub refresh: Option<String>,
}

/// Returns today's stored digest, generating and storing it on first request.
async fn load_or_generate(state: &AppState, params: &DigestQuery) -> Result<Digest, AppError> {
    let session = resolve_session(params.session.as_deref());
    let today = Local::now().date_naive();

    if !parse_flag("refresh", params.refresh.as_deref()) {
        if let Some(existing) = state.digests.load(session, today).await {
            return Ok(existing);
        }
    }

    let preferences = state.preferences.load(session).await;
    if !preferences.has_preferences() {
        return Err(AppError::UnprocessableEntity(
            "Set your preferences to generate a personalized digest".to_string(),
        ));
    }

    let digest = generate_digest(
        state.catalog.jobs(),
        &preferences,
        state.scorer.as_ref(),
        state.digest_size,
        today,
    );
    state.digests.save(session, &digest).await?;
    info!(session, date = %today, jobs = digest.jobs.len(), "Digest generated");

    Ok(digest)
}

/// GET /api/v1/digest
pub async fn handle_get_digest(
    State(state): State<AppState>,
    Query(params): Query<DigestQuery>,
) -> Result<Json<Digest>, AppError> {
    Ok(Json(load_or_generate(&state, &params).await?))
}

/// GET /api/v1/digest/text
pub async fn handle_get_digest_text(
    State(state): State<AppState>,
    Query(params): Query<DigestQuery>,
) -> Result<impl IntoResponse, AppError> {
    let digest = load_or_generate(&state, &params).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        digest.to_plain_text(),
    ))
}
