//! Meal Tracker Shared Library
//!
//! Pure core of the meal tracker: models, profile calculations, meal
//! statistics and dashboard views, shared by the backend and WASM modules.

pub mod dashboard;
pub mod errors;
pub mod models;
pub mod profile;
pub mod statistics;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use profile::*;
pub use statistics::*;
pub use types::*;

// Export units module items (canonical source for unit types)
pub use units::*;

pub use models::{ActivityLevel, Gender, Goal, Meal, MealDate, MealInput, Profile, ProfileInput};
