//! Data models for the Meal Tracker application

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

// ============================================================================
// Dates
// ============================================================================

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

static ISO_DATE: Lazy<regex_lite::Regex> =
    Lazy::new(|| regex_lite::Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

/// Calendar day a meal is attributed to, as a fixed-width `YYYY-MM-DD` string.
///
/// The string form is kept on purpose: zero-padded ISO dates order
/// lexicographically exactly as they do chronologically, so range filters
/// compare strings directly. Construction rejects anything that would
/// break that ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MealDate(String);

impl MealDate {
    /// Parse and validate an ISO 8601 calendar date
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if !ISO_DATE.is_match(value) {
            return Err(ValidationError::new("date", "must be formatted as YYYY-MM-DD"));
        }
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| ValidationError::new("date", "is not a valid calendar date"))?;
        if date.year() < MIN_YEAR {
            return Err(ValidationError::new("date", "year must be 0001 or later"));
        }
        Ok(Self(value.to_string()))
    }

    /// Whether `date` can be represented as a fixed-width `YYYY-MM-DD` string
    pub fn is_representable(date: NaiveDate) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&date.year())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    /// The day a UTC timestamp falls on
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::from_naive(at.date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_naive(&self) -> NaiveDate {
        // Only ever constructed from a string chrono already accepted
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
    }
}

impl TryFrom<String> for MealDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MealDate> for String {
    fn from(date: MealDate) -> Self {
        date.0
    }
}

impl std::str::FromStr for MealDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MealDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Meals
// ============================================================================

/// Editable fields of a meal, as collected from the user.
///
/// `date` stays a raw string here; it is checked by
/// [`crate::validation::validate_meal_input`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealInput {
    pub food_name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    pub date: String,
    pub meal_type: String,
}

/// A logged food entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(alias = "transactionId")]
    pub id: String,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub date: MealDate,
    pub meal_type: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Meal {
    /// Build a new meal from validated input
    pub fn create(
        id: impl Into<String>,
        input: MealInput,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        crate::validation::validate_meal_input(&input)?;
        let date = MealDate::parse(&input.date)?;
        Ok(Self {
            id: id.into(),
            food_name: input.food_name.trim().to_string(),
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fats: input.fats,
            date,
            meal_type: input.meal_type.trim().to_string(),
            created_at,
            updated_at: None,
        })
    }

    /// Replace the editable fields, keeping id and creation time
    pub fn apply(&self, input: MealInput, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut updated = Self::create(self.id.clone(), input, self.created_at)?;
        updated.updated_at = Some(now);
        Ok(updated)
    }

    /// The editable fields of this meal
    pub fn input(&self) -> MealInput {
        MealInput {
            food_name: self.food_name.clone(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            date: self.date.to_string(),
            meal_type: self.meal_type.clone(),
        }
    }
}

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex, used for the BMR constant only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!(
                "Unknown gender '{}'. Must be one of: {}",
                s,
                crate::validation::VALID_GENDERS.join(", ")
            )),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    /// Label shown in the profile summary
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtraActive => "Extra Active",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown activity level '{}'. Must be one of: {}",
                    s,
                    crate::validation::VALID_ACTIVITY_LEVELS.join(", ")
                )
            })
    }
}

/// Weight goal driving the calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    Maintain,
    WeightGain,
}

impl Goal {
    /// Daily calorie offset from maintenance
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Goal::WeightLoss => -500.0,
            Goal::Maintain => 0.0,
            Goal::WeightGain => 500.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::Maintain => "maintain",
            Goal::WeightGain => "weight_gain",
        }
    }

    /// Label shown in the profile summary
    pub fn label(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::Maintain => "Maintain Weight",
            Goal::WeightGain => "Weight Gain",
        }
    }
}

impl std::str::FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight_loss" => Ok(Goal::WeightLoss),
            "maintain" => Ok(Goal::Maintain),
            "weight_gain" => Ok(Goal::WeightGain),
            _ => Err(format!(
                "Unknown goal '{}'. Must be one of: {}",
                s,
                crate::validation::VALID_GOALS.join(", ")
            )),
        }
    }
}

/// Raw biometric input, exactly as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub age: i32,
    pub gender: String,
    #[serde(alias = "heightFt")]
    pub height_feet: i32,
    #[serde(alias = "heightIn")]
    pub height_inches: i32,
    #[serde(alias = "weightLbs")]
    pub weight_pounds: f64,
    pub activity_level: String,
    pub goal: String,
}

/// Computed user profile.
///
/// Only [`crate::profile::compute_profile`] builds one, so `bmr` and
/// `daily_calorie_goal` always match the biometric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub age: u32,
    pub gender: Gender,
    #[serde(alias = "heightFt")]
    pub height_feet: u32,
    #[serde(alias = "heightIn")]
    pub height_inches: u32,
    #[serde(alias = "weightLbs")]
    pub weight_pounds: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub bmr: i64,
    pub daily_calorie_goal: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// The input this profile was computed from
    pub fn input(&self) -> ProfileInput {
        ProfileInput {
            age: self.age as i32,
            gender: self.gender.as_str().to_string(),
            height_feet: self.height_feet as i32,
            height_inches: self.height_inches as i32,
            weight_pounds: self.weight_pounds,
            activity_level: self.activity_level.as_str().to_string(),
            goal: self.goal.as_str().to_string(),
        }
    }

    /// One-line description, e.g. `30 year old male, 5'10", 180 lbs`
    pub fn summary(&self) -> String {
        format!(
            "{} year old {}, {}, {} lbs",
            self.age,
            self.gender.as_str(),
            crate::units::format_feet_inches(self.height_feet, self.height_inches),
            self.weight_pounds
        )
    }
}
