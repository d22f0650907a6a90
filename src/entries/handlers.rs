use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::{Date, OffsetDateTime};
use tracing::{info, instrument};

use crate::{auth::Session, error::ApiError, goals, state::AppState};

use super::dto::{CreateEntryRequest, DailySummary, DayQuery, Pagination, PeriodQuery};
use super::nutrition;
use super::repo::{self, ItemFacts, MealEntry, NewEntry, PeriodTotals};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/entries", get(list_entries))
        .route("/entries/recent", get(recent_entries))
        .route("/summary", get(daily_summary))
        .route("/summary/periods", get(period_summary))
}

const MAX_PAGE_SIZE: i64 = 200;

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/entries", post(create_entry))
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    _session: Session,
    Json(payload): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<MealEntry>), ApiError> {
    let item_name = payload.item_name.trim().to_string();
    if item_name.is_empty() {
        return Err(ApiError::InvalidInput("item name is required".into()));
    }

    // Reject bad input before touching the store; no partial writes.
    let (computed_calories, computed_protein) = nutrition::compute(
        payload.calories_per_serving,
        payload.protein_per_serving,
        payload.serving_size,
        payload.weight_consumed,
    )?;

    let entry = repo::insert(
        &state.db,
        NewEntry {
            item_name,
            calories_per_serving: payload.calories_per_serving,
            protein_per_serving: payload.protein_per_serving,
            serving_size: payload.serving_size,
            weight_consumed: payload.weight_consumed,
            computed_calories,
            computed_protein,
            meal_type: payload.meal_type,
            log_date: payload.log_date.unwrap_or_else(today),
        },
    )
    .await
    .map_err(ApiError::Storage)?;

    info!(id = entry.id, item = %entry.item_name, "entry logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    _session: Session,
) -> Result<Json<Vec<ItemFacts>>, ApiError> {
    let items = repo::list_distinct_items(&state.db)
        .await
        .map_err(ApiError::Storage)?;
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    _session: Session,
    Query(q): Query<DayQuery>,
) -> Result<Json<Vec<MealEntry>>, ApiError> {
    let date = q.date.unwrap_or_else(today);
    let entries = repo::list_by_date(&state.db, date)
        .await
        .map_err(ApiError::Storage)?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn recent_entries(
    State(state): State<AppState>,
    _session: Session,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<MealEntry>>, ApiError> {
    // Negative limit means "no limit" to SQLite and a negative offset errors.
    let limit = p.limit.clamp(1, MAX_PAGE_SIZE);
    let offset = p.offset.max(0);
    let entries = repo::list_recent(&state.db, limit, offset)
        .await
        .map_err(ApiError::Storage)?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn period_summary(
    State(state): State<AppState>,
    _session: Session,
    Query(q): Query<PeriodQuery>,
) -> Result<Json<Vec<PeriodTotals>>, ApiError> {
    let totals = repo::sum_by_period(&state.db, q.period)
        .await
        .map_err(ApiError::Storage)?;
    Ok(Json(totals))
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    _session: Session,
    Query(q): Query<DayQuery>,
) -> Result<Json<DailySummary>, ApiError> {
    let date = q.date.unwrap_or_else(today);
    let totals = repo::sum_by_date(&state.db, date)
        .await
        .map_err(ApiError::Storage)?;
    let goal = goals::repo::get(&state.db)
        .await
        .map_err(ApiError::Storage)?;
    Ok(Json(DailySummary {
        date,
        total_calories: totals.total_calories,
        total_protein: totals.total_protein,
        goal,
    }))
}
