use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{auth::Session, error::ApiError, state::AppState};

use super::repo::{self, Goal};

pub fn routes() -> Router<AppState> {
    Router::new().route("/goal", get(get_goal).put(put_goal))
}

#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    _session: Session,
) -> Result<Json<Option<Goal>>, ApiError> {
    let goal = repo::get(&state.db).await.map_err(ApiError::Storage)?;
    Ok(Json(goal))
}

#[instrument(skip(state))]
pub async fn put_goal(
    State(state): State<AppState>,
    _session: Session,
    Json(payload): Json<Goal>,
) -> Result<Json<Goal>, ApiError> {
    if payload.target_calories < 0.0 || payload.target_protein < 0.0 {
        return Err(ApiError::InvalidInput(
            "targets must not be negative".into(),
        ));
    }

    let goal = repo::upsert(&state.db, payload)
        .await
        .map_err(ApiError::Storage)?;
    info!(
        target_calories = goal.target_calories,
        target_protein = goal.target_protein,
        "goal saved"
    );
    Ok(Json(goal))
}
