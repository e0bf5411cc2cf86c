//! Input validation functions
//!
//! Field-level checks for meal and profile input. Each check returns the
//! first problem found as a [`ValidationError`] naming the field.

use crate::errors::ValidationError;
use crate::models::{MealDate, MealInput};

/// Valid activity levels
pub const VALID_ACTIVITY_LEVELS: &[&str] = &[
    "sedentary",
    "lightly_active",
    "moderately_active",
    "very_active",
    "extra_active",
];

/// Valid gender values
pub const VALID_GENDERS: &[&str] = &["male", "female"];

/// Valid weight goals
pub const VALID_GOALS: &[&str] = &["weight_loss", "maintain", "weight_gain"];

/// Validate a non-negative quantity such as calories or grams of a macro
pub fn validate_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    if value < 0.0 {
        return Err(ValidationError::new(field, "cannot be negative"));
    }
    Ok(())
}

/// Validate a strictly positive quantity such as body weight
pub fn validate_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    if value <= 0.0 {
        return Err(ValidationError::new(field, "must be greater than 0"));
    }
    Ok(())
}

/// Validate a required free-text field
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

/// Validate every field of a meal entry
pub fn validate_meal_input(input: &MealInput) -> Result<(), ValidationError> {
    validate_required("food_name", &input.food_name)?;
    validate_non_negative("calories", input.calories)?;
    validate_non_negative("protein", input.protein)?;
    validate_non_negative("carbs", input.carbs)?;
    validate_non_negative("fats", input.fats)?;
    MealDate::parse(&input.date)?;
    validate_required("meal_type", &input.meal_type)?;
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "food_name" => "Food Name",
        "calories" => "Calories",
        "protein" => "Protein",
        "carbs" => "Carbs",
        "fats" => "Fats",
        "date" => "Date",
        "start_date" => "Start Date",
        "end_date" => "End Date",
        "meal_type" => "Meal Type",
        "age" => "Age",
        "gender" => "Gender",
        "height" | "height_feet" | "height_inches" => "Height",
        "weight_pounds" => "Weight",
        "activity_level" => "Activity Level",
        "goal" => "Goal",
        _ => field_name,
    }
}
