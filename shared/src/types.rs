//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Meal, MealDate, MealInput, Profile};
use crate::profile::{BmiCategory, BmiResult};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Meal Types
// ============================================================================

/// Create meal request.
///
/// `id` and `createdAt` are normally omitted; a replicating client passes
/// them so the copy keeps the original identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    #[serde(default, alias = "transactionId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub meal: MealInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Meal> for CreateMealRequest {
    fn from(meal: &Meal) -> Self {
        Self {
            id: Some(meal.id.clone()),
            meal: meal.input(),
            created_at: Some(meal.created_at),
        }
    }
}

/// Meal list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealQuery {
    pub date: Option<String>,
    pub meal_type: Option<String>,
    pub search: Option<String>,
}

/// Recent meals query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

// ============================================================================
// Profile Types
// ============================================================================

/// BMI response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: BmiCategory,
    pub summary: String,
}

impl BmiResponse {
    pub fn new(profile: &Profile, result: BmiResult) -> Self {
        Self {
            // one decimal, as displayed
            bmi: (result.value * 10.0).round() / 10.0,
            category: result.category,
            summary: profile.summary(),
        }
    }
}

// ============================================================================
// Statistics and Dashboard Types
// ============================================================================

/// Statistics query; both bounds inclusive and optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Dashboard query; defaults to today (UTC)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}

/// Calorie trend query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendQuery {
    pub days: Option<u32>,
    pub end: Option<String>,
}

/// Dashboard trend response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    pub start: MealDate,
    pub end: MealDate,
    pub days: Vec<crate::dashboard::DayCalories>,
}
