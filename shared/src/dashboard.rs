//! Dashboard and meal-list helpers
//!
//! Pure views over a meal collection: today's progress against the calorie
//! goal, the most recently logged meals, a per-day calorie trend and the
//! filtered meal list.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Meal, MealDate, Profile};
use crate::statistics::DEFAULT_CALORIE_GOAL;

/// Number of meals shown in the "recent meals" panel
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Number of days in the calorie trend chart
pub const DEFAULT_TREND_DAYS: u32 = 7;

// ============================================================================
// Daily Progress
// ============================================================================

/// How a day's intake compares to the calorie goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// More than 20% of the goal left
    OnTrack,
    CloseToGoal,
    /// Over by at most 10% of the goal
    SlightlyOver,
    OverGoal,
}

impl GoalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::OnTrack => "On track",
            GoalStatus::CloseToGoal => "Close to goal",
            GoalStatus::SlightlyOver => "Slightly over",
            GoalStatus::OverGoal => "Over goal",
        }
    }

    /// Classify the remaining calories against the goal
    pub fn classify(remaining: i64, calorie_goal: i64) -> Self {
        let goal = calorie_goal as f64;
        if remaining > 0 {
            if remaining as f64 > goal * 0.2 {
                GoalStatus::OnTrack
            } else {
                GoalStatus::CloseToGoal
            }
        } else if (remaining.unsigned_abs() as f64) <= goal * 0.1 {
            GoalStatus::SlightlyOver
        } else {
            GoalStatus::OverGoal
        }
    }
}

/// Intake for a single day against the calorie goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub date: MealDate,
    pub meal_count: u32,
    /// Rounded to whole kcal
    pub calories_consumed: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calorie_goal: i64,
    /// Negative when over the goal
    pub calories_remaining: i64,
    /// Capped at 100
    pub progress_percent: f64,
    pub status: GoalStatus,
}

/// Progress for `date`; the goal comes from the profile or the 2000 default
pub fn daily_progress(meals: &[Meal], profile: Option<&Profile>, date: &MealDate) -> DailyProgress {
    let mut calories = 0.0_f64;
    let (mut protein, mut carbs, mut fats) = (0.0, 0.0, 0.0);
    let mut meal_count = 0;
    for meal in meals.iter().filter(|m| &m.date == date) {
        calories += meal.calories;
        protein += meal.protein;
        carbs += meal.carbs;
        fats += meal.fats;
        meal_count += 1;
    }

    let calorie_goal = profile.map_or(DEFAULT_CALORIE_GOAL, |p| p.daily_calorie_goal);
    let calories_consumed = calories.round() as i64;
    let calories_remaining = calorie_goal - calories_consumed;
    let progress_percent = if calorie_goal > 0 {
        (calories_consumed as f64 / calorie_goal as f64 * 100.0).min(100.0)
    } else {
        0.0
    };

    DailyProgress {
        date: date.clone(),
        meal_count,
        calories_consumed,
        protein,
        carbs,
        fats,
        calorie_goal,
        calories_remaining,
        progress_percent,
        status: GoalStatus::classify(calories_remaining, calorie_goal),
    }
}

// ============================================================================
// Recent Meals and Trend
// ============================================================================

/// The `limit` most recently created meals, newest first
pub fn recent_meals(meals: &[Meal], limit: usize) -> Vec<Meal> {
    let mut sorted: Vec<Meal> = meals.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// Calories logged on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCalories {
    pub date: MealDate,
    pub calories: f64,
}

/// Calories per day for the `days` days ending at `end`, oldest first.
/// Days with no meals are reported as 0; the window never reaches before
/// 0001-01-01.
pub fn calorie_trend(meals: &[Meal], end: NaiveDate, days: u32) -> Vec<DayCalories> {
    let mut by_day: BTreeMap<MealDate, f64> = BTreeMap::new();
    for meal in meals {
        *by_day.entry(meal.date.clone()).or_default() += meal.calories;
    }

    (0..days)
        .rev()
        .filter_map(|offset| end.checked_sub_signed(Duration::days(i64::from(offset))))
        .filter(|day| MealDate::is_representable(*day))
        .map(|day| {
            let date = MealDate::from_naive(day);
            let calories = by_day.get(&date).copied().unwrap_or(0.0);
            DayCalories { date, calories }
        })
        .collect()
}

// ============================================================================
// Meal List Filtering
// ============================================================================

/// Meal list filters; every present field must match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFilter {
    pub date: Option<MealDate>,
    /// Exact, case-sensitive label
    pub meal_type: Option<String>,
    /// Case-insensitive substring of the food name
    pub search: Option<String>,
}

impl MealFilter {
    pub fn matches(&self, meal: &Meal) -> bool {
        if let Some(date) = &self.date {
            if &meal.date != date {
                return false;
            }
        }
        if let Some(meal_type) = self.meal_type.as_deref().filter(|t| !t.is_empty()) {
            if meal.meal_type != meal_type {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !meal.food_name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Meals matching `filter`, newest date first
pub fn filter_meals(meals: &[Meal], filter: &MealFilter) -> Vec<Meal> {
    let mut matched: Vec<Meal> = meals.iter().filter(|m| filter.matches(m)).cloned().collect();
    // stable: meals on the same date keep their stored order
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    matched
}

// ============================================================================
// Demo Data
// ============================================================================

/// The demo meals seeded into an empty store: three today, two yesterday
pub fn sample_meals(today: NaiveDate, now: DateTime<Utc>) -> Vec<Meal> {
    let yesterday = today - Duration::days(1);
    let earlier = now - Duration::days(1);

    let entries: [(&str, &str, f64, f64, f64, f64, NaiveDate, &str, DateTime<Utc>); 5] = [
        ("sample001", "Greek Yogurt with Berries", 150.0, 15.0, 20.0, 4.0, today, "Breakfast", now),
        ("sample002", "Grilled Chicken Salad", 320.0, 35.0, 12.0, 14.0, today, "Lunch", now),
        ("sample003", "Almonds (1 oz)", 160.0, 6.0, 6.0, 14.0, today, "Snack", now),
        ("sample004", "Oatmeal with Banana", 220.0, 8.0, 45.0, 3.0, yesterday, "Breakfast", earlier),
        ("sample005", "Turkey Sandwich", 380.0, 25.0, 40.0, 12.0, yesterday, "Lunch", earlier),
    ];

    entries
        .into_iter()
        .map(|(id, food_name, calories, protein, carbs, fats, date, meal_type, created_at)| Meal {
            id: id.to_string(),
            food_name: food_name.to_string(),
            calories,
            protein,
            carbs,
            fats,
            date: MealDate::from_naive(date),
            meal_type: meal_type.to_string(),
            created_at,
            updated_at: None,
        })
        .collect()
}
