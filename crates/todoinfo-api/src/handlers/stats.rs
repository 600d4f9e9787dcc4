//! Page data handlers.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    Json,
};
use chrono::Utc;
use tracing::info;

use todoinfo_metrics::{example_task_lists, Metrics, PageData};

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::PageQuery;

/// GET /api/stats - Page data for the account behind the bearer token.
pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageData>> {
    let token = bearer_token(&headers)?;

    let lists = state.fetcher.fetch_all(token).await?.into_result()?;
    let metrics = Metrics::new(lists);
    let page = PageData::new(&metrics, query.full);

    info!(
        lists = metrics.lists().len(),
        total_age = page.total_age,
        "Served account stats"
    );
    Ok(Json(page))
}

/// GET /api/example - Page data for the built-in example lists.
pub async fn get_example(Query(query): Query<PageQuery>) -> Json<PageData> {
    let now = Utc::now();
    let metrics = Metrics::at(example_task_lists(now), now);
    Json(PageData::new(&metrics, query.full))
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed Authorization header".to_string()))?;

    match value.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(ApiError::Unauthorized(
            "expected a bearer token".to_string(),
        )),
    }
}
