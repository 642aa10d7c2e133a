//! Handlers for analytics endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::ClicksResponse;
use crate::domain::entities::StatsSnapshot;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the aggregate analytics snapshot.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// Recomputed from the stored collections on every call; results are
/// identical regardless of which storage backend is active.
pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<StatsSnapshot>, AppError> {
    Ok(Json(state.stats.overview().await?))
}

/// Lists click events for one link, newest first.
///
/// # Endpoint
///
/// `GET /api/links/{id}/clicks`
pub async fn link_clicks_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClicksResponse>, AppError> {
    let clicks = state.stats.clicks_for_link(id).await?;
    Ok(Json(ClicksResponse::new(id, clicks)))
}
