//! Statistics service

use meal_tracker_shared::errors::ValidationError;
use meal_tracker_shared::models::MealDate;
use meal_tracker_shared::statistics::{aggregate, DateRange, Statistics};
use meal_tracker_shared::types::StatisticsQuery;
use tracing::debug;

use crate::error::ApiError;
use crate::storage::Store;

/// Statistics service for business logic
pub struct StatisticsService;

impl StatisticsService {
    /// Aggregate stored meals over the queried range
    pub async fn report(store: &dyn Store, query: &StatisticsQuery) -> Result<Statistics, ApiError> {
        let range = DateRange::new(
            parse_bound("start_date", query.start_date.as_deref())?,
            parse_bound("end_date", query.end_date.as_deref())?,
        );

        let meals = store.list_meals().await?;
        let profile = store.load_profile().await?;
        let stats = aggregate(&meals, profile.as_ref(), &range);

        debug!(
            meals = stats.total_meals,
            days = stats.days_tracked(),
            has_profile = profile.is_some(),
            "Statistics computed"
        );
        Ok(stats)
    }
}

/// Parse an optional range bound; blank means unbounded
pub(crate) fn parse_bound(field: &str, raw: Option<&str>) -> Result<Option<MealDate>, ValidationError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => MealDate::parse(value)
            .map(Some)
            .map_err(|e| ValidationError::new(field, e.reason)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MealStore, MemoryStore};
    use chrono::Utc;
    use meal_tracker_shared::models::{Meal, MealInput};

    async fn store_with_meals() -> MemoryStore {
        let store = MemoryStore::new();
        for (id, calories, date, meal_type) in [
            ("a", 150.0, "2024-01-01", "Breakfast"),
            ("b", 320.0, "2024-01-01", "Lunch"),
            ("c", 220.0, "2024-01-02", "Breakfast"),
        ] {
            let input = MealInput {
                food_name: format!("Meal {}", id),
                calories,
                protein: 0.0,
                carbs: 0.0,
                fats: 0.0,
                date: date.to_string(),
                meal_type: meal_type.to_string(),
            };
            store
                .insert_meal(&Meal::create(id, input, Utc::now()).unwrap())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_report_over_all_meals() {
        let store = store_with_meals().await;
        let stats = StatisticsService::report(&store, &StatisticsQuery::default())
            .await
            .unwrap();

        assert_eq!(stats.total_calories, 690.0);
        assert_eq!(stats.average_calories, 345.0);
    }

    #[tokio::test]
    async fn test_report_with_start_date() {
        let store = store_with_meals().await;
        let query = StatisticsQuery {
            start_date: Some("2024-01-02".to_string()),
            end_date: Some("".to_string()),
        };
        let stats = StatisticsService::report(&store, &query).await.unwrap();

        assert_eq!(stats.total_meals, 1);
        assert_eq!(stats.total_calories, 220.0);
    }

    #[tokio::test]
    async fn test_bad_bound_names_the_field() {
        let store = store_with_meals().await;
        let query = StatisticsQuery {
            start_date: None,
            end_date: Some("2024/01/02".to_string()),
        };
        match StatisticsService::report(&store, &query).await {
            Err(ApiError::InvalidInput(e)) => assert_eq!(e.field, "end_date"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
