use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Preferences;
use crate::session::SessionQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: Preferences,
    pub has_preferences: bool,
}

impl From<Preferences> for PreferencesResponse {
    fn from(preferences: Preferences) -> Self {
        Self {
            has_preferences: preferences.has_preferences(),
            preferences,
        }
    }
}

/// GET /api/v1/preferences
pub async fn handle_get_preferences(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let preferences = state.preferences.load(params.id()).await;
    Ok(Json(preferences.into()))
}

/// PUT /api/v1/preferences
///
/// Takes the whole record; there are no partial updates.
pub async fn handle_put_preferences(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let preferences = preferences.normalized();
    state.preferences.save(params.id(), &preferences).await?;
    Ok(Json(preferences.into()))
}
