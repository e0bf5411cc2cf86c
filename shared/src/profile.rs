//! Profile calculations
//!
//! Turns raw biometric input into a [`Profile`] carrying BMR and a
//! goal-adjusted daily calorie target, and classifies BMI.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no I/O, the clock is passed in
//! 2. **All or nothing**: invalid input yields a [`ValidationError`], never
//!    a partially computed profile
//! 3. **No silent defaults**: unknown enum values are rejected

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;
use crate::models::{ActivityLevel, Gender, Goal, Profile, ProfileInput};
use crate::units::{feet_inches_to_cm, feet_inches_to_m, pounds_to_kg, total_inches};
use crate::validation::validate_positive;

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Total Daily Energy Expenditure: BMR × activity multiplier
pub fn calculate_maintenance_calories(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Goal-adjusted daily calorie target, rounded to whole kcal
pub fn calculate_daily_calorie_goal(maintenance: f64, goal: Goal) -> i64 {
    (maintenance + goal.calorie_adjustment()).round() as i64
}

/// Breakdown of the energy figures behind a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyBreakdown {
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Unrounded BMR
    pub bmr: f64,
    pub activity_multiplier: f64,
    /// Unrounded maintenance calories
    pub maintenance_calories: f64,
    pub daily_calorie_goal: i64,
}

/// Parsed and range-checked profile fields
struct CheckedInput {
    age: u32,
    gender: Gender,
    height_feet: u32,
    height_inches: u32,
    weight_pounds: f64,
    activity_level: ActivityLevel,
    goal: Goal,
}

fn check_input(input: &ProfileInput) -> Result<CheckedInput, ValidationError> {
    if input.age <= 0 {
        return Err(ValidationError::new("age", "must be greater than 0"));
    }
    if input.height_feet < 0 {
        return Err(ValidationError::new("height_feet", "cannot be negative"));
    }
    if input.height_inches < 0 {
        return Err(ValidationError::new("height_inches", "cannot be negative"));
    }
    let (height_feet, height_inches) = (input.height_feet as u32, input.height_inches as u32);
    if total_inches(height_feet, height_inches) == 0 {
        return Err(ValidationError::new("height", "must be greater than 0"));
    }
    validate_positive("weight_pounds", input.weight_pounds)?;
    let gender: Gender = input
        .gender
        .parse()
        .map_err(|msg: String| ValidationError::new("gender", msg))?;
    let activity_level: ActivityLevel = input
        .activity_level
        .parse()
        .map_err(|msg: String| ValidationError::new("activity_level", msg))?;
    let goal: Goal = input
        .goal
        .parse()
        .map_err(|msg: String| ValidationError::new("goal", msg))?;

    Ok(CheckedInput {
        age: input.age as u32,
        gender,
        height_feet,
        height_inches,
        weight_pounds: input.weight_pounds,
        activity_level,
        goal,
    })
}

fn energy_of(checked: &CheckedInput) -> EnergyBreakdown {
    let height_cm = feet_inches_to_cm(checked.height_feet, checked.height_inches);
    let weight_kg = pounds_to_kg(checked.weight_pounds);
    let bmr = calculate_bmr_mifflin(weight_kg, height_cm, checked.age, checked.gender);
    // Maintenance is derived from the unrounded BMR
    let maintenance_calories = calculate_maintenance_calories(bmr, checked.activity_level);

    EnergyBreakdown {
        height_cm,
        weight_kg,
        bmr,
        activity_multiplier: checked.activity_level.multiplier(),
        maintenance_calories,
        daily_calorie_goal: calculate_daily_calorie_goal(maintenance_calories, checked.goal),
    }
}

/// Compute the energy breakdown for an input without building a profile
pub fn calculate_energy(input: &ProfileInput) -> Result<EnergyBreakdown, ValidationError> {
    check_input(input).map(|checked| energy_of(&checked))
}

/// Compute a profile from raw input
///
/// `now` becomes both `created_at` and `updated_at`.
pub fn compute_profile(input: &ProfileInput, now: DateTime<Utc>) -> Result<Profile, ValidationError> {
    let checked = check_input(input)?;
    let energy = energy_of(&checked);

    Ok(Profile {
        age: checked.age,
        gender: checked.gender,
        height_feet: checked.height_feet,
        height_inches: checked.height_inches,
        weight_pounds: checked.weight_pounds,
        activity_level: checked.activity_level,
        goal: checked.goal,
        bmr: energy.bmr.round() as i64,
        daily_calorie_goal: energy.daily_calorie_goal,
        created_at: now,
        updated_at: now,
    })
}

/// Replace an existing profile with one computed from new input
///
/// The whole profile is recomputed; only `created_at` carries over.
pub fn recompute_profile(
    previous: &Profile,
    input: &ProfileInput,
    now: DateTime<Utc>,
) -> Result<Profile, ValidationError> {
    let mut profile = compute_profile(input, now)?;
    profile.created_at = previous.created_at;
    Ok(profile)
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// BMI calculation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiResult {
    pub value: f64,
    pub category: BmiCategory,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Classify BMI into category; a boundary value belongs to the upper category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::NormalWeight
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// BMI of a profile
pub fn compute_bmi(profile: &Profile) -> BmiResult {
    let height_m = feet_inches_to_m(profile.height_feet, profile.height_inches);
    let weight_kg = pounds_to_kg(profile.weight_pounds);
    let value = calculate_bmi(weight_kg, height_m);

    BmiResult {
        value,
        category: classify_bmi(value),
    }
}
