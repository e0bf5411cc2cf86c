//! Statistics API routes

use crate::error::ApiError;
use crate::routes::{AppJson, AppQuery};
use crate::services::StatisticsService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Router};
use meal_tracker_shared::statistics::Statistics;
use meal_tracker_shared::types::StatisticsQuery;

/// Create statistics routes
pub fn statistics_routes() -> Router<AppState> {
    Router::new().route("/", get(get_statistics))
}

/// GET /api/statistics?startDate&endDate - Aggregate report
async fn get_statistics(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<StatisticsQuery>,
) -> Result<AppJson<Statistics>, ApiError> {
    let stats = StatisticsService::report(state.store(), &query).await?;
    Ok(AppJson(stats))
}
