use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, SessionResponse},
        session::SessionKeys,
    },
    config::Credentials,
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/session", post(login))
}

/// Gate for the rest of the API: exact match of both fields against the
/// configured pair. No lockout, no hashing.
pub fn authenticate(expected: &Credentials, username: &str, password: &str) -> bool {
    expected.username == username && expected.password == password
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    if !authenticate(&state.config.credentials, &payload.username, &payload.password) {
        warn!(username = %payload.username, "login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = SessionKeys::from_ref(&state);
    let token = keys.sign().map_err(ApiError::Internal)?;

    info!("session issued");
    Ok(Json(SessionResponse { token }))
}
