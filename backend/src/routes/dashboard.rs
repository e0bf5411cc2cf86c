//! Dashboard API routes

use crate::error::ApiError;
use crate::routes::{AppJson, AppQuery};
use crate::services::DashboardService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Router};
use chrono::Utc;
use meal_tracker_shared::dashboard::DailyProgress;
use meal_tracker_shared::types::{DashboardQuery, TrendQuery, TrendResponse};

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_daily_progress))
        .route("/trend", get(get_trend))
}

/// GET /api/dashboard?date - Progress against the calorie goal
async fn get_daily_progress(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<AppJson<DailyProgress>, ApiError> {
    let today = Utc::now().date_naive();
    let progress = DashboardService::daily(state.store(), &query, today).await?;
    Ok(AppJson(progress))
}

/// GET /api/dashboard/trend?days&end - Calories per day
async fn get_trend(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TrendQuery>,
) -> Result<AppJson<TrendResponse>, ApiError> {
    let today = Utc::now().date_naive();
    let trend = DashboardService::trend(state.store(), &query, today).await?;
    Ok(AppJson(trend))
}
