//! Primary/fallback store chain
//!
//! Every operation goes to the primary store first. If the primary fails,
//! the failure is logged and the same operation is served by the fallback.
//! Nothing is synchronized between the two.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meal_tracker_shared::models::{Meal, MealInput, Profile};
use std::sync::Arc;
use tracing::warn;

use super::{MealStore, ProfileStore, Store, StoreResult};

/// Store that tries `primary`, then `fallback`
pub struct FallbackStore {
    primary: Arc<dyn Store>,
    fallback: Arc<dyn Store>,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn Store>, fallback: Arc<dyn Store>) -> Self {
        Self { primary, fallback }
    }
}

/// Run `$op` on the primary store, falling back on error
macro_rules! with_fallback {
    ($self:ident, $name:literal, |$store:ident| $op:expr) => {{
        let $store = &$self.primary;
        match $op.await {
            Ok(value) => Ok(value),
            Err(err) if err.is_conflict() => Err(err),
            Err(err) => {
                warn!(
                    operation = $name,
                    primary = $self.primary.name(),
                    fallback = $self.fallback.name(),
                    error = %err,
                    "Primary store failed, using fallback"
                );
                let $store = &$self.fallback;
                $op.await
            }
        }
    }};
}

#[async_trait]
impl MealStore for FallbackStore {
    async fn list_meals(&self) -> StoreResult<Vec<Meal>> {
        with_fallback!(self, "list_meals", |store| store.list_meals())
    }

    async fn get_meal(&self, id: &str) -> StoreResult<Option<Meal>> {
        with_fallback!(self, "get_meal", |store| store.get_meal(id))
    }

    async fn insert_meal(&self, meal: &Meal) -> StoreResult<()> {
        with_fallback!(self, "insert_meal", |store| store.insert_meal(meal))
    }

    async fn update_meal(
        &self,
        id: &str,
        input: &MealInput,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Meal>> {
        with_fallback!(self, "update_meal", |store| store.update_meal(id, input, now))
    }

    async fn delete_meal(&self, id: &str) -> StoreResult<bool> {
        with_fallback!(self, "delete_meal", |store| store.delete_meal(id))
    }
}

#[async_trait]
impl ProfileStore for FallbackStore {
    async fn load_profile(&self) -> StoreResult<Option<Profile>> {
        with_fallback!(self, "load_profile", |store| store.load_profile())
    }

    async fn save_profile(&self, profile: &Profile) -> StoreResult<()> {
        with_fallback!(self, "save_profile", |store| store.save_profile(profile))
    }
}

#[async_trait]
impl Store for FallbackStore {
    fn name(&self) -> &'static str {
        "fallback"
    }

    /// Ready when either store is reachable
    async fn ping(&self) -> StoreResult<()> {
        with_fallback!(self, "ping", |store| store.ping())
    }
}
