//! Meal statistics
//!
//! Aggregates a meal collection into totals, a per-meal-type breakdown and
//! per-day summaries over an optional inclusive date range.
//!
//! Aggregation is a single pass through a [`StatisticsAccumulator`]. Every
//! field is a sum, so accumulators built over disjoint slices can be merged
//! in any order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Meal, MealDate, Profile};

/// Daily calorie goal used when no profile exists
pub const DEFAULT_CALORIE_GOAL: i64 = 2000;

/// Inclusive date range; a missing bound is unbounded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<MealDate>,
    pub end: Option<MealDate>,
}

impl DateRange {
    pub fn new(start: Option<MealDate>, end: Option<MealDate>) -> Self {
        Self { start, end }
    }

    /// Every date
    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: &MealDate) -> bool {
        self.start.as_ref().map_or(true, |start| date >= start)
            && self.end.as_ref().map_or(true, |end| date <= end)
    }
}

/// Count and calories for one meal-type label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTypeSummary {
    pub count: u32,
    pub total_calories: f64,
}

/// Totals for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub meal_count: u32,
    pub calorie_goal: i64,
    pub goal_progress_percent: f64,
}

/// Aggregate report over a set of meals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_meals: u32,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    /// Calories per distinct day with at least one meal
    pub average_calories: f64,
    pub meal_type_breakdown: BTreeMap<String, MealTypeSummary>,
    pub daily_totals: BTreeMap<MealDate, DailyTotal>,
}

impl Statistics {
    /// Number of distinct days covered
    pub fn days_tracked(&self) -> usize {
        self.daily_totals.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct DaySums {
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    meal_count: u32,
}

impl DaySums {
    fn merge(&mut self, other: &DaySums) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fats += other.fats;
        self.meal_count += other.meal_count;
    }
}

/// Running sums for [`aggregate`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsAccumulator {
    total_meals: u32,
    total_calories: f64,
    total_protein: f64,
    total_carbs: f64,
    total_fats: f64,
    by_type: BTreeMap<String, MealTypeSummary>,
    by_day: BTreeMap<MealDate, DaySums>,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, meal: &Meal) {
        self.total_meals += 1;
        self.total_calories += meal.calories;
        self.total_protein += meal.protein;
        self.total_carbs += meal.carbs;
        self.total_fats += meal.fats;

        let summary = self.by_type.entry(meal.meal_type.clone()).or_default();
        summary.count += 1;
        summary.total_calories += meal.calories;

        let day = self.by_day.entry(meal.date.clone()).or_default();
        day.calories += meal.calories;
        day.protein += meal.protein;
        day.carbs += meal.carbs;
        day.fats += meal.fats;
        day.meal_count += 1;
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: StatisticsAccumulator) {
        self.total_meals += other.total_meals;
        self.total_calories += other.total_calories;
        self.total_protein += other.total_protein;
        self.total_carbs += other.total_carbs;
        self.total_fats += other.total_fats;

        for (label, summary) in other.by_type {
            let entry = self.by_type.entry(label).or_default();
            entry.count += summary.count;
            entry.total_calories += summary.total_calories;
        }
        for (date, sums) in other.by_day {
            self.by_day.entry(date).or_default().merge(&sums);
        }
    }

    /// Produce the report; `profile` only supplies the daily calorie goal
    pub fn finish(self, profile: Option<&Profile>) -> Statistics {
        let calorie_goal = profile.map_or(DEFAULT_CALORIE_GOAL, |p| p.daily_calorie_goal);
        let days = self.by_day.len();

        let daily_totals = self
            .by_day
            .into_iter()
            .map(|(date, sums)| {
                let goal_progress_percent = match profile {
                    Some(_) if calorie_goal > 0 => sums.calories / calorie_goal as f64 * 100.0,
                    _ => 0.0,
                };
                let total = DailyTotal {
                    calories: sums.calories,
                    protein: sums.protein,
                    carbs: sums.carbs,
                    fats: sums.fats,
                    meal_count: sums.meal_count,
                    calorie_goal,
                    goal_progress_percent,
                };
                (date, total)
            })
            .collect();

        let average_calories = if days > 0 {
            self.total_calories / days as f64
        } else {
            0.0
        };

        Statistics {
            total_meals: self.total_meals,
            total_calories: self.total_calories,
            total_protein: self.total_protein,
            total_carbs: self.total_carbs,
            total_fats: self.total_fats,
            average_calories,
            meal_type_breakdown: self.by_type,
            daily_totals,
        }
    }
}

/// Aggregate the meals whose date falls inside `range`
pub fn aggregate<'a, I>(meals: I, profile: Option<&Profile>, range: &DateRange) -> Statistics
where
    I: IntoIterator<Item = &'a Meal>,
{
    let mut acc = StatisticsAccumulator::new();
    for meal in meals.into_iter().filter(|m| range.contains(&m.date)) {
        acc.add(meal);
    }
    acc.finish(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealInput, ProfileInput};
    use crate::profile::compute_profile;
    use chrono::Utc;
    use proptest::prelude::*;

    fn meal(id: &str, calories: f64, date: &str, meal_type: &str) -> Meal {
        let input = MealInput {
            food_name: format!("Food {}", id),
            calories,
            protein: calories / 20.0,
            carbs: calories / 10.0,
            fats: calories / 40.0,
            date: date.to_string(),
            meal_type: meal_type.to_string(),
        };
        Meal::create(id, input, Utc::now()).unwrap()
    }

    fn example_meals() -> Vec<Meal> {
        vec![
            meal("a", 150.0, "2024-01-01", "Breakfast"),
            meal("b", 320.0, "2024-01-01", "Lunch"),
            meal("c", 220.0, "2024-01-02", "Breakfast"),
        ]
    }

    fn profile_with_goal() -> Profile {
        let input = ProfileInput {
            age: 30,
            gender: "male".to_string(),
            height_feet: 5,
            height_inches: 10,
            weight_pounds: 180.0,
            activity_level: "moderately_active".to_string(),
            goal: "maintain".to_string(),
        };
        compute_profile(&input, Utc::now()).unwrap()
    }

    fn date(value: &str) -> MealDate {
        MealDate::parse(value).unwrap()
    }

    #[test]
    fn test_totals_and_average() {
        let stats = aggregate(&example_meals(), None, &DateRange::all());

        assert_eq!(stats.total_meals, 3);
        assert_eq!(stats.total_calories, 690.0);
        assert_eq!(stats.days_tracked(), 2);
        assert_eq!(stats.average_calories, 345.0);

        let breakfast = &stats.meal_type_breakdown["Breakfast"];
        assert_eq!(breakfast.count, 2);
        assert_eq!(breakfast.total_calories, 370.0);
        assert_eq!(stats.meal_type_breakdown["Lunch"].count, 1);

        let first_day = &stats.daily_totals[&date("2024-01-01")];
        assert_eq!(first_day.calories, 470.0);
        assert_eq!(first_day.meal_count, 2);
    }

    #[test]
    fn test_start_date_filter() {
        let range = DateRange::new(Some(date("2024-01-02")), None);
        let stats = aggregate(&example_meals(), None, &range);

        assert_eq!(stats.total_meals, 1);
        assert_eq!(stats.total_calories, 220.0);
        assert_eq!(stats.average_calories, 220.0);
        assert_eq!(stats.daily_totals.keys().collect::<Vec<_>>(), vec![&date("2024-01-02")]);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = DateRange::new(Some(date("2024-01-01")), Some(date("2024-01-01")));
        let stats = aggregate(&example_meals(), None, &range);
        assert_eq!(stats.total_meals, 2);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let range = DateRange::new(Some(date("2024-01-05")), Some(date("2024-01-01")));
        let stats = aggregate(&example_meals(), None, &range);
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate(&Vec::<Meal>::new(), None, &DateRange::all());

        assert_eq!(stats.total_meals, 0);
        assert_eq!(stats.total_calories, 0.0);
        assert_eq!(stats.average_calories, 0.0);
        assert!(stats.meal_type_breakdown.is_empty());
        assert!(stats.daily_totals.is_empty());
    }

    #[test]
    fn test_meal_type_labels_are_case_sensitive() {
        let meals = vec![
            meal("a", 100.0, "2024-01-01", "Lunch"),
            meal("b", 100.0, "2024-01-01", "lunch"),
        ];
        let stats = aggregate(&meals, None, &DateRange::all());
        assert_eq!(stats.meal_type_breakdown.len(), 2);
        assert_eq!(stats.meal_type_breakdown["Lunch"].count, 1);
        assert_eq!(stats.meal_type_breakdown["lunch"].count, 1);
    }

    #[test]
    fn test_progress_without_profile_is_zero() {
        let stats = aggregate(&example_meals(), None, &DateRange::all());
        for total in stats.daily_totals.values() {
            assert_eq!(total.calorie_goal, DEFAULT_CALORIE_GOAL);
            assert_eq!(total.goal_progress_percent, 0.0);
        }
    }

    #[test]
    fn test_progress_with_profile() {
        let profile = profile_with_goal();
        let stats = aggregate(&example_meals(), Some(&profile), &DateRange::all());

        let day = &stats.daily_totals[&date("2024-01-02")];
        assert_eq!(day.calorie_goal, 2763);
        assert!((day.goal_progress_percent - 220.0 / 2763.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_goal_gives_zero_progress() {
        let mut profile = profile_with_goal();
        profile.daily_calorie_goal = 0;
        let stats = aggregate(&example_meals(), Some(&profile), &DateRange::all());
        for total in stats.daily_totals.values() {
            assert_eq!(total.goal_progress_percent, 0.0);
        }
    }

    #[test]
    fn test_serialized_shape() {
        let stats = aggregate(&example_meals(), None, &DateRange::all());
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["totalMeals"], 3);
        assert_eq!(json["mealTypeBreakdown"]["Breakfast"]["totalCalories"], 370.0);
        assert_eq!(json["dailyTotals"]["2024-01-01"]["mealCount"], 2);
        assert_eq!(json["dailyTotals"]["2024-01-01"]["goalProgressPercent"], 0.0);
    }

    fn meal_strategy() -> impl Strategy<Value = Meal> {
        (
            0u32..2000,
            1u32..29,
            prop::sample::select(vec!["Breakfast", "Lunch", "Dinner", "Snack"]),
        )
            .prop_map(|(calories, day, meal_type)| {
                meal(
                    &format!("m{}-{}", day, calories),
                    calories as f64,
                    &format!("2024-02-{:02}", day),
                    meal_type,
                )
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: splitting the input and merging gives the same counts
        #[test]
        fn prop_merge_matches_sequential(
            meals in prop::collection::vec(meal_strategy(), 0..40),
            split in 0usize..40
        ) {
            let split = split.min(meals.len());
            let (left, right) = meals.split_at(split);

            let mut a = StatisticsAccumulator::new();
            left.iter().for_each(|m| a.add(m));
            let mut b = StatisticsAccumulator::new();
            right.iter().for_each(|m| b.add(m));
            // merge in the opposite order to exercise commutativity
            b.merge(a);
            let merged = b.finish(None);

            let sequential = aggregate(&meals, None, &DateRange::all());

            prop_assert_eq!(merged.total_meals, sequential.total_meals);
            // whole-number calories sum exactly
            prop_assert_eq!(merged.total_calories, sequential.total_calories);
            prop_assert_eq!(&merged.meal_type_breakdown, &sequential.meal_type_breakdown);
            prop_assert_eq!(merged.daily_totals.len(), sequential.daily_totals.len());
            for (date, total) in &sequential.daily_totals {
                prop_assert_eq!(merged.daily_totals[date].meal_count, total.meal_count);
                prop_assert_eq!(merged.daily_totals[date].calories, total.calories);
            }
        }

        /// Property: per-day counts and breakdown counts both add up to the total
        #[test]
        fn prop_counts_are_consistent(meals in prop::collection::vec(meal_strategy(), 0..40)) {
            let stats = aggregate(&meals, None, &DateRange::all());
            let by_day: u32 = stats.daily_totals.values().map(|d| d.meal_count).sum();
            let by_type: u32 = stats.meal_type_breakdown.values().map(|s| s.count).sum();
            prop_assert_eq!(by_day, stats.total_meals);
            prop_assert_eq!(by_type, stats.total_meals);
            prop_assert_eq!(stats.total_meals as usize, meals.len());
        }

        /// Property: a range never admits meals outside its bounds
        #[test]
        fn prop_range_filters(
            meals in prop::collection::vec(meal_strategy(), 0..40),
            start in 1u32..29,
            len in 0u32..10
        ) {
            let start_date = date(&format!("2024-02-{:02}", start));
            let end_date = date(&format!("2024-02-{:02}", (start + len).min(29)));
            let range = DateRange::new(Some(start_date.clone()), Some(end_date.clone()));
            let stats = aggregate(&meals, None, &range);

            let expected = meals.iter().filter(|m| m.date >= start_date && m.date <= end_date).count();
            prop_assert_eq!(stats.total_meals as usize, expected);
            for day in stats.daily_totals.keys() {
                prop_assert!(day >= &start_date && day <= &end_date);
            }
        }
    }
}
