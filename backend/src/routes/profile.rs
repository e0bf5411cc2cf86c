//! Profile API routes

use crate::error::ApiError;
use crate::routes::AppJson;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Router};
use chrono::Utc;
use meal_tracker_shared::models::{Profile, ProfileInput};
use meal_tracker_shared::types::BmiResponse;

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(save_profile).post(save_profile))
        .route("/bmi", get(get_bmi))
}

/// GET /api/profile - Get the stored profile
async fn get_profile(State(state): State<AppState>) -> Result<AppJson<Profile>, ApiError> {
    let profile = ProfileService::get(state.store()).await?;
    Ok(AppJson(profile))
}

/// PUT /api/profile - Compute and store the profile
async fn save_profile(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProfileInput>,
) -> Result<AppJson<Profile>, ApiError> {
    let profile = ProfileService::save(state.store(), input, Utc::now()).await?;
    Ok(AppJson(profile))
}

/// GET /api/profile/bmi - BMI of the stored profile
async fn get_bmi(State(state): State<AppState>) -> Result<AppJson<BmiResponse>, ApiError> {
    let bmi = ProfileService::bmi(state.store()).await?;
    Ok(AppJson(bmi))
}
