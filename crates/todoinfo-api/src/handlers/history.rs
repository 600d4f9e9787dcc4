//! History handler.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{HistoryQuery, HistoryResponse, DEFAULT_HISTORY_DAYS, MAX_HISTORY_DAYS};

/// GET /api/history - Per-day max task age from stored snapshots.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    if days == 0 || days > MAX_HISTORY_DAYS {
        return Err(ApiError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_HISTORY_DAYS
        )));
    }

    let points = state.stats_store.time_series(days, Utc::now())?;
    Ok(Json(HistoryResponse { days, points }))
}
