//! Error types for the Meal Tracker core

use thiserror::Error;

use crate::validation::get_field_display_label;

/// Rejected input, tagged with the offending field.
///
/// Produced by profile computation and meal input validation. A failed
/// call never yields a partially built value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation error on {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// User-facing label for the field, e.g. `weight_pounds` -> "Weight"
    pub fn display_label(&self) -> &str {
        get_field_display_label(&self.field)
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label(), self.reason)
    }
}
