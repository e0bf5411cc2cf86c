//! Meal log API routes

use crate::error::ApiError;
use crate::routes::{AppJson, AppQuery};
use crate::services::MealService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::Utc;
use meal_tracker_shared::dashboard::DEFAULT_RECENT_LIMIT;
use meal_tracker_shared::models::{Meal, MealInput};
use meal_tracker_shared::types::{CreateMealRequest, MealQuery, RecentQuery};

/// Create meal routes
pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_meals).post(create_meal))
        .route("/recent", get(recent_meals))
        .route("/:id", get(get_meal).put(update_meal).delete(delete_meal))
}

/// GET /api/meals - List meals, newest date first
async fn list_meals(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<MealQuery>,
) -> Result<AppJson<Vec<Meal>>, ApiError> {
    let meals = MealService::list(state.store(), &query).await?;
    Ok(AppJson(meals))
}

/// POST /api/meals - Log a meal
async fn create_meal(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateMealRequest>,
) -> Result<(StatusCode, AppJson<Meal>), ApiError> {
    let meal = MealService::create(state.store(), req, Utc::now()).await?;
    Ok((StatusCode::CREATED, AppJson(meal)))
}

/// GET /api/meals/recent - Most recently logged meals
async fn recent_meals(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RecentQuery>,
) -> Result<AppJson<Vec<Meal>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let meals = MealService::recent(state.store(), limit).await?;
    Ok(AppJson(meals))
}

/// GET /api/meals/:id
async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<AppJson<Meal>, ApiError> {
    let meal = MealService::get(state.store(), &id).await?;
    Ok(AppJson(meal))
}

/// PUT /api/meals/:id - Replace the editable fields of a meal
async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<MealInput>,
) -> Result<AppJson<Meal>, ApiError> {
    let meal = MealService::update(state.store(), &id, input, Utc::now()).await?;
    Ok(AppJson(meal))
}

/// DELETE /api/meals/:id
async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    MealService::delete(state.store(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
