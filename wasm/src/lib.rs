//! Meal Tracker WASM Module
//!
//! Browser bindings for the profile and statistics calculations, so the
//! client can show the same figures the backend computes. Values cross the
//! boundary as JSON strings in the backend's wire format.

use chrono::{NaiveDate, Utc};
use meal_tracker_shared::dashboard::daily_progress;
use meal_tracker_shared::models::{Meal, MealDate, Profile, ProfileInput};
use meal_tracker_shared::profile::{calculate_energy, classify_bmi, compute_bmi, compute_profile};
use meal_tracker_shared::statistics::{aggregate, DateRange};
use meal_tracker_shared::types::BmiResponse;
use wasm_bindgen::prelude::*;

/// Compute a profile (BMR and calorie goal) from profile input JSON
#[wasm_bindgen]
pub fn compute_profile_json(input_json: &str) -> Result<String, JsValue> {
    profile_from_input(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Energy figures (unrounded BMR, maintenance) for profile input JSON
#[wasm_bindgen]
pub fn energy_breakdown_json(input_json: &str) -> Result<String, JsValue> {
    energy_from_input(input_json).map_err(|e| JsValue::from_str(&e))
}

/// BMI and category for a stored profile
#[wasm_bindgen]
pub fn compute_bmi_json(profile_json: &str) -> Result<String, JsValue> {
    bmi_of_profile(profile_json).map_err(|e| JsValue::from_str(&e))
}

/// BMI category label for a raw BMI value
#[wasm_bindgen]
pub fn bmi_category(bmi: f64) -> String {
    classify_bmi(bmi).description().to_string()
}

/// Aggregate statistics over a JSON array of meals
///
/// Empty or missing bounds leave that side of the range open.
#[wasm_bindgen]
pub fn aggregate_statistics_json(
    meals_json: &str,
    profile_json: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
) -> Result<String, JsValue> {
    statistics_of(
        meals_json,
        profile_json.as_deref(),
        start_date.as_deref(),
        end_date.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Progress against the calorie goal for one day (default today)
#[wasm_bindgen]
pub fn daily_progress_json(
    meals_json: &str,
    profile_json: Option<String>,
    date: Option<String>,
) -> Result<String, JsValue> {
    let today = Utc::now().date_naive();
    progress_of(meals_json, profile_json.as_deref(), date.as_deref(), today)
        .map_err(|e| JsValue::from_str(&e))
}

fn profile_from_input(input_json: &str) -> Result<String, String> {
    let input: ProfileInput = serde_json::from_str(input_json).map_err(|e| e.to_string())?;
    let profile = compute_profile(&input, Utc::now()).map_err(|e| e.user_message())?;
    serde_json::to_string(&profile).map_err(|e| e.to_string())
}

fn energy_from_input(input_json: &str) -> Result<String, String> {
    let input: ProfileInput = serde_json::from_str(input_json).map_err(|e| e.to_string())?;
    let energy = calculate_energy(&input).map_err(|e| e.user_message())?;
    serde_json::to_string(&energy).map_err(|e| e.to_string())
}

fn bmi_of_profile(profile_json: &str) -> Result<String, String> {
    let profile: Profile = serde_json::from_str(profile_json).map_err(|e| e.to_string())?;
    let response = BmiResponse::new(&profile, compute_bmi(&profile));
    serde_json::to_string(&response).map_err(|e| e.to_string())
}

fn parse_profile(profile_json: Option<&str>) -> Result<Option<Profile>, String> {
    match profile_json.map(str::trim) {
        Some(json) if !json.is_empty() && json != "null" => {
            serde_json::from_str(json).map(Some).map_err(|e| e.to_string())
        }
        _ => Ok(None),
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<MealDate>, String> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => MealDate::parse(value)
            .map(Some)
            .map_err(|e| e.user_message()),
        _ => Ok(None),
    }
}

fn statistics_of(
    meals_json: &str,
    profile_json: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<String, String> {
    let meals: Vec<Meal> = serde_json::from_str(meals_json).map_err(|e| e.to_string())?;
    let profile = parse_profile(profile_json)?;
    let range = DateRange::new(parse_date(start_date)?, parse_date(end_date)?);

    let stats = aggregate(&meals, profile.as_ref(), &range);
    serde_json::to_string(&stats).map_err(|e| e.to_string())
}

fn progress_of(
    meals_json: &str,
    profile_json: Option<&str>,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<String, String> {
    let meals: Vec<Meal> = serde_json::from_str(meals_json).map_err(|e| e.to_string())?;
    let profile = parse_profile(profile_json)?;
    let date = parse_date(date)?.unwrap_or_else(|| MealDate::from_naive(today));

    let progress = daily_progress(&meals, profile.as_ref(), &date);
    serde_json::to_string(&progress).map_err(|e| e.to_string())
}
