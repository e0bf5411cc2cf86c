//! In-memory store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meal_tracker_shared::models::{Meal, MealInput, Profile};
use tokio::sync::RwLock;

use super::{apply_edit, MealStore, ProfileStore, Store, StoreError, StoreResult};

/// Store held in process memory; contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    meals: RwLock<Vec<Meal>>,
    profile: RwLock<Option<Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with meals
    pub fn with_meals(meals: Vec<Meal>) -> Self {
        Self {
            meals: RwLock::new(meals),
            profile: RwLock::new(None),
        }
    }
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn list_meals(&self) -> StoreResult<Vec<Meal>> {
        Ok(self.meals.read().await.clone())
    }

    async fn get_meal(&self, id: &str) -> StoreResult<Option<Meal>> {
        Ok(self.meals.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_meal(&self, meal: &Meal) -> StoreResult<()> {
        let mut meals = self.meals.write().await;
        if meals.iter().any(|m| m.id == meal.id) {
            return Err(StoreError::Duplicate(meal.id.clone()));
        }
        meals.push(meal.clone());
        Ok(())
    }

    async fn update_meal(
        &self,
        id: &str,
        input: &MealInput,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Meal>> {
        let mut meals = self.meals.write().await;
        match meals.iter_mut().find(|m| m.id == id) {
            Some(meal) => {
                *meal = apply_edit(meal, input, now)?;
                Ok(Some(meal.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_meal(&self, id: &str) -> StoreResult<bool> {
        let mut meals = self.meals.write().await;
        let before = meals.len();
        meals.retain(|m| m.id != id);
        Ok(meals.len() != before)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn load_profile(&self) -> StoreResult<Option<Profile>> {
        Ok(self.profile.read().await.clone())
    }

    async fn save_profile(&self, profile: &Profile) -> StoreResult<()> {
        *self.profile.write().await = Some(profile.clone());
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }
}
