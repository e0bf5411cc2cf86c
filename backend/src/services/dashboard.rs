//! Dashboard service

use chrono::NaiveDate;
use meal_tracker_shared::dashboard::{calorie_trend, daily_progress, DailyProgress, DEFAULT_TREND_DAYS};
use meal_tracker_shared::models::MealDate;
use meal_tracker_shared::types::{DashboardQuery, TrendQuery, TrendResponse};

use super::statistics::parse_bound;
use crate::error::ApiError;
use crate::storage::Store;

/// Longest supported trend window
pub const MAX_TREND_DAYS: u32 = 366;

/// Dashboard service for business logic
pub struct DashboardService;

impl DashboardService {
    /// Progress against the calorie goal for the queried day (default `today`)
    pub async fn daily(
        store: &dyn Store,
        query: &DashboardQuery,
        today: NaiveDate,
    ) -> Result<DailyProgress, ApiError> {
        let date = parse_bound("date", query.date.as_deref())?
            .unwrap_or_else(|| MealDate::from_naive(today));

        let meals = store.list_meals().await?;
        let profile = store.load_profile().await?;
        Ok(daily_progress(&meals, profile.as_ref(), &date))
    }

    /// Per-day calories for a window ending at the queried day (default `today`)
    pub async fn trend(
        store: &dyn Store,
        query: &TrendQuery,
        today: NaiveDate,
    ) -> Result<TrendResponse, ApiError> {
        let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
        if days == 0 || days > MAX_TREND_DAYS {
            return Err(ApiError::Validation(format!(
                "days must be between 1 and {}",
                MAX_TREND_DAYS
            )));
        }
        let end = parse_bound("end", query.end.as_deref())?
            .map(|d| d.to_naive())
            .unwrap_or(today);

        let meals = store.list_meals().await?;
        let trend = calorie_trend(&meals, end, days);

        Ok(TrendResponse {
            start: trend
                .first()
                .map(|d| d.date.clone())
                .unwrap_or_else(|| MealDate::from_naive(end)),
            end: MealDate::from_naive(end),
            days: trend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MealService;
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use meal_tracker_shared::dashboard::GoalStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        MealService::seed_sample_data(&store, today(), Utc::now())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_daily_defaults_to_today() {
        let store = seeded_store().await;
        let progress = DashboardService::daily(&store, &DashboardQuery::default(), today())
            .await
            .unwrap();

        assert_eq!(progress.date.as_str(), "2024-01-02");
        assert_eq!(progress.calories_consumed, 630);
        assert_eq!(progress.calorie_goal, 2000);
        assert_eq!(progress.status, GoalStatus::OnTrack);
    }

    #[tokio::test]
    async fn test_daily_for_other_date() {
        let store = seeded_store().await;
        let query = DashboardQuery {
            date: Some("2024-01-01".to_string()),
        };
        let progress = DashboardService::daily(&store, &query, today()).await.unwrap();
        assert_eq!(progress.calories_consumed, 600);
        assert_eq!(progress.meal_count, 2);
    }

    #[tokio::test]
    async fn test_trend_window() {
        let store = seeded_store().await;
        let trend = DashboardService::trend(&store, &TrendQuery::default(), today())
            .await
            .unwrap();

        assert_eq!(trend.days.len(), 7);
        assert_eq!(trend.start.as_str(), "2023-12-27");
        assert_eq!(trend.end.as_str(), "2024-01-02");
        assert_eq!(trend.days[5].calories, 600.0);
        assert_eq!(trend.days[6].calories, 630.0);
    }

    #[tokio::test]
    async fn test_trend_rejects_bad_window() {
        let store = MemoryStore::new();
        let query = TrendQuery {
            days: Some(0),
            end: None,
        };
        assert!(matches!(
            DashboardService::trend(&store, &query, today()).await,
            Err(ApiError::Validation(_))
        ));
    }
}
