//! Profile service

use chrono::{DateTime, Utc};
use meal_tracker_shared::models::{Profile, ProfileInput};
use meal_tracker_shared::profile::{compute_bmi, compute_profile, recompute_profile};
use meal_tracker_shared::types::BmiResponse;
use tracing::info;

use crate::error::ApiError;
use crate::storage::Store;

/// Profile service for business logic
pub struct ProfileService;

impl ProfileService {
    /// The stored profile
    pub async fn get(store: &dyn Store) -> Result<Profile, ApiError> {
        store
            .load_profile()
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
    }

    /// Compute a profile from `input` and store it, replacing any existing
    /// profile. Nothing is stored when the input is invalid.
    pub async fn save(
        store: &dyn Store,
        input: ProfileInput,
        now: DateTime<Utc>,
    ) -> Result<Profile, ApiError> {
        let profile = match store.load_profile().await? {
            Some(previous) => recompute_profile(&previous, &input, now)?,
            None => compute_profile(&input, now)?,
        };
        store.save_profile(&profile).await?;

        info!(
            bmr = profile.bmr,
            daily_calorie_goal = profile.daily_calorie_goal,
            goal = profile.goal.as_str(),
            "Profile saved"
        );
        Ok(profile)
    }

    /// BMI of the stored profile
    pub async fn bmi(store: &dyn Store) -> Result<BmiResponse, ApiError> {
        let profile = Self::get(store).await?;
        let result = compute_bmi(&profile);
        Ok(BmiResponse::new(&profile, result))
    }
}
