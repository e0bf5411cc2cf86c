//! Local JSON file store
//!
//! Meals live in `meals.json` as an array, the profile in `profile.json`.
//! Every write goes to a temporary file that is then renamed over the
//! target, so a crash never leaves a half-written file behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meal_tracker_shared::models::{Meal, MealInput, Profile};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::{apply_edit, MealStore, ProfileStore, Store, StoreError, StoreResult};

const MEALS_FILE: &str = "meals.json";
const PROFILE_FILE: &str = "profile.json";

/// Store backed by JSON files in a data directory
#[derive(Debug)]
pub struct LocalStore {
    dir: PathBuf,
    /// Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl LocalStore {
    /// Open a store, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        debug!(dir = %dir.display(), "Opened local store");
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_meals(&self) -> StoreResult<Vec<Meal>> {
        Ok(read_json(&self.dir.join(MEALS_FILE)).await?.unwrap_or_default())
    }

    async fn write_meals(&self, meals: &[Meal]) -> StoreResult<()> {
        write_json(&self.dir.join(MEALS_FILE), &meals).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl MealStore for LocalStore {
    async fn list_meals(&self) -> StoreResult<Vec<Meal>> {
        let _guard = self.lock.lock().await;
        self.read_meals().await
    }

    async fn get_meal(&self, id: &str) -> StoreResult<Option<Meal>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_meals().await?.into_iter().find(|m| m.id == id))
    }

    async fn insert_meal(&self, meal: &Meal) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut meals = self.read_meals().await?;
        if meals.iter().any(|m| m.id == meal.id) {
            return Err(StoreError::Duplicate(meal.id.clone()));
        }
        meals.push(meal.clone());
        self.write_meals(&meals).await
    }

    async fn update_meal(
        &self,
        id: &str,
        input: &MealInput,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Meal>> {
        let _guard = self.lock.lock().await;
        let mut meals = self.read_meals().await?;
        let Some(meal) = meals.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        *meal = apply_edit(meal, input, now)?;
        let updated = meal.clone();
        self.write_meals(&meals).await?;
        Ok(Some(updated))
    }

    async fn delete_meal(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock().await;
        let mut meals = self.read_meals().await?;
        let before = meals.len();
        meals.retain(|m| m.id != id);
        if meals.len() == before {
            return Ok(false);
        }
        self.write_meals(&meals).await?;
        Ok(true)
    }
}

#[async_trait]
impl ProfileStore for LocalStore {
    async fn load_profile(&self) -> StoreResult<Option<Profile>> {
        let _guard = self.lock.lock().await;
        read_json(&self.dir.join(PROFILE_FILE)).await
    }

    async fn save_profile(&self, profile: &Profile) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        write_json(&self.dir.join(PROFILE_FILE), profile).await
    }
}

#[async_trait]
impl Store for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn ping(&self) -> StoreResult<()> {
        fs::metadata(&self.dir).await?;
        Ok(())
    }
}
