//! Meal log service
//!
//! Validation, identity and ordering rules for meal entries. Storage is
//! whatever [`Store`] the caller passes in.

use chrono::{DateTime, NaiveDate, Utc};
use meal_tracker_shared::dashboard::{filter_meals, recent_meals, sample_meals, MealFilter};
use meal_tracker_shared::models::{Meal, MealDate, MealInput};
use meal_tracker_shared::types::{CreateMealRequest, MealQuery};
use meal_tracker_shared::validation::validate_meal_input;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::storage::Store;

/// Upper bound for the recent meals list
pub const MAX_RECENT_LIMIT: usize = 100;

/// Meal service for business logic
pub struct MealService;

impl MealService {
    /// Meals matching the query, newest date first
    pub async fn list(store: &dyn Store, query: &MealQuery) -> Result<Vec<Meal>, ApiError> {
        let filter = Self::filter_from_query(query)?;
        let meals = store.list_meals().await?;
        Ok(filter_meals(&meals, &filter))
    }

    fn filter_from_query(query: &MealQuery) -> Result<MealFilter, ApiError> {
        let date = match query.date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(MealDate::parse(raw)?),
            _ => None,
        };
        Ok(MealFilter {
            date,
            meal_type: query.meal_type.clone(),
            search: query.search.clone(),
        })
    }

    /// Most recently created meals
    pub async fn recent(store: &dyn Store, limit: usize) -> Result<Vec<Meal>, ApiError> {
        if limit == 0 || limit > MAX_RECENT_LIMIT {
            return Err(ApiError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_RECENT_LIMIT
            )));
        }
        let meals = store.list_meals().await?;
        Ok(recent_meals(&meals, limit))
    }

    pub async fn get(store: &dyn Store, id: &str) -> Result<Meal, ApiError> {
        store
            .get_meal(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Meal {} not found", id)))
    }

    /// Log a new meal
    ///
    /// A caller-supplied id must be unused (the store rejects it otherwise,
    /// reported as a conflict); without one a UUID v4 is assigned.
    pub async fn create(
        store: &dyn Store,
        request: CreateMealRequest,
        now: DateTime<Utc>,
    ) -> Result<Meal, ApiError> {
        let id = match request.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        let meal = Meal::create(id, request.meal, request.created_at.unwrap_or(now))?;
        store.insert_meal(&meal).await?;

        debug!(id = %meal.id, date = %meal.date, calories = meal.calories, "Meal logged");
        Ok(meal)
    }

    /// Replace the editable fields of a meal
    pub async fn update(
        store: &dyn Store,
        id: &str,
        input: MealInput,
        now: DateTime<Utc>,
    ) -> Result<Meal, ApiError> {
        validate_meal_input(&input)?;
        let meal = store
            .update_meal(id, &input, now)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Meal {} not found", id)))?;

        debug!(id = %meal.id, "Meal updated");
        Ok(meal)
    }

    pub async fn delete(store: &dyn Store, id: &str) -> Result<(), ApiError> {
        if !store.delete_meal(id).await? {
            return Err(ApiError::NotFound(format!("Meal {} not found", id)));
        }
        debug!(id, "Meal deleted");
        Ok(())
    }

    /// Insert the demo meals if the store holds no meals yet.
    /// Returns the number of meals inserted.
    pub async fn seed_sample_data(
        store: &dyn Store,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<usize, ApiError> {
        if !store.list_meals().await?.is_empty() {
            return Ok(0);
        }

        let samples = sample_meals(today, now);
        for meal in &samples {
            store.insert_meal(meal).await?;
        }
        info!(count = samples.len(), "Added sample meals for demo purposes");
        Ok(samples.len())
    }
}
