//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the storage layer and the pure meal tracker core.

pub mod dashboard;
pub mod meals;
pub mod profile;
pub mod statistics;

pub use dashboard::DashboardService;
pub use meals::MealService;
pub use profile::ProfileService;
pub use statistics::StatisticsService;
