//! Meal and profile storage
//!
//! Services talk to a [`Store`] and never to a concrete backend. Backends:
//! - [`MemoryStore`]: process memory, used by tests and `memory` config
//! - [`LocalStore`]: JSON files in a data directory
//! - [`PgStore`]: PostgreSQL via sqlx
//! - [`RemoteStore`]: another meal tracker instance over HTTP
//! - [`FallbackStore`]: primary first, fallback on primary failure

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meal_tracker_shared::models::{Meal, MealInput, Profile};
use thiserror::Error;

pub mod fallback;
pub mod local;
pub mod memory;
pub mod postgres;
pub mod remote;

pub use fallback::FallbackStore;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use remote::RemoteStore;

/// Storage failure
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Stored data is invalid: {0}")]
    Corrupt(String),

    #[error("Meal {0} already exists")]
    Duplicate(String),

    #[error("Invalid remote URL: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// The store answered, but the request conflicts with stored data
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Meal persistence
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Every stored meal, in insertion order
    async fn list_meals(&self) -> StoreResult<Vec<Meal>>;

    async fn get_meal(&self, id: &str) -> StoreResult<Option<Meal>>;

    /// Fails with [`StoreError::Duplicate`] when a meal with the same id exists
    async fn insert_meal(&self, meal: &Meal) -> StoreResult<()>;

    /// Replace the editable fields of a meal. Returns the stored meal, or
    /// `None` when no meal has `id`.
    async fn update_meal(
        &self,
        id: &str,
        input: &MealInput,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Meal>>;

    /// Returns false when no meal has `id`
    async fn delete_meal(&self, id: &str) -> StoreResult<bool>;
}

/// Profile persistence; at most one profile exists
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_profile(&self) -> StoreResult<Option<Profile>>;

    async fn save_profile(&self, profile: &Profile) -> StoreResult<()>;
}

/// Full storage backend
#[async_trait]
pub trait Store: MealStore + ProfileStore {
    /// Backend name for logs and health output
    fn name(&self) -> &'static str;

    /// Verify the backend is reachable
    async fn ping(&self) -> StoreResult<()> {
        self.load_profile().await.map(|_| ())
    }
}

/// Apply an already validated edit to a stored meal
pub(crate) fn apply_edit(meal: &Meal, input: &MealInput, now: DateTime<Utc>) -> StoreResult<Meal> {
    meal.apply(input.clone(), now)
        .map_err(|e| StoreError::Corrupt(e.to_string()))
}
