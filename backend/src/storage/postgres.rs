//! PostgreSQL store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meal_tracker_shared::models::{Meal, MealDate, MealInput, Profile};
use sqlx::PgPool;

use super::{apply_edit, MealStore, ProfileStore, Store, StoreError, StoreResult};
use crate::db;

/// Meal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealRecord {
    pub id: String,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub meal_date: String,
    pub meal_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<MealRecord> for Meal {
    type Error = StoreError;

    fn try_from(record: MealRecord) -> Result<Self, Self::Error> {
        let date = MealDate::parse(&record.meal_date)
            .map_err(|e| StoreError::Corrupt(format!("meal {}: {}", record.id, e)))?;
        Ok(Meal {
            id: record.id,
            food_name: record.food_name,
            calories: record.calories,
            protein: record.protein,
            carbs: record.carbs,
            fats: record.fats,
            date,
            meal_type: record.meal_type,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub age: i32,
    pub gender: String,
    pub height_feet: i32,
    pub height_inches: i32,
    pub weight_pounds: f64,
    pub activity_level: String,
    pub goal: String,
    pub bmr: i64,
    pub daily_calorie_goal: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = StoreError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        let corrupt = |msg: String| StoreError::Corrupt(format!("profile: {}", msg));
        let non_negative = |field: &str, value: i32| {
            u32::try_from(value).map_err(|_| corrupt(format!("{} is negative", field)))
        };
        Ok(Profile {
            age: non_negative("age", record.age)?,
            gender: record.gender.parse().map_err(corrupt)?,
            height_feet: non_negative("height_feet", record.height_feet)?,
            height_inches: non_negative("height_inches", record.height_inches)?,
            weight_pounds: record.weight_pounds,
            activity_level: record.activity_level.parse().map_err(corrupt)?,
            goal: record.goal.parse().map_err(corrupt)?,
            bmr: record.bmr,
            daily_calorie_goal: record.daily_calorie_goal,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

const MEAL_COLUMNS: &str =
    "id, food_name, calories, protein, carbs, fats, meal_date, meal_type, created_at, updated_at";

/// Store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MealStore for PgStore {
    async fn list_meals(&self) -> StoreResult<Vec<Meal>> {
        let records = sqlx::query_as::<_, MealRecord>(&format!(
            "SELECT {} FROM meals ORDER BY seq",
            MEAL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(Meal::try_from).collect()
    }

    async fn get_meal(&self, id: &str) -> StoreResult<Option<Meal>> {
        let record = sqlx::query_as::<_, MealRecord>(&format!(
            "SELECT {} FROM meals WHERE id = $1",
            MEAL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(Meal::try_from).transpose()
    }

    async fn insert_meal(&self, meal: &Meal) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO meals (id, food_name, calories, protein, carbs, fats, meal_date, meal_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&meal.id)
        .bind(&meal.food_name)
        .bind(meal.calories)
        .bind(meal.protein)
        .bind(meal.carbs)
        .bind(meal.fats)
        .bind(meal.date.as_str())
        .bind(&meal.meal_type)
        .bind(meal.created_at)
        .bind(meal.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Duplicate(meal.id.clone())
            }
            other => StoreError::Database(other),
        })?;

        Ok(())
    }

    async fn update_meal(
        &self,
        id: &str,
        input: &MealInput,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Meal>> {
        let Some(existing) = self.get_meal(id).await? else {
            return Ok(None);
        };
        let meal = apply_edit(&existing, input, now)?;

        let result = sqlx::query(
            r#"
            UPDATE meals
            SET food_name = $2, calories = $3, protein = $4, carbs = $5, fats = $6,
                meal_date = $7, meal_type = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(&meal.id)
        .bind(&meal.food_name)
        .bind(meal.calories)
        .bind(meal.protein)
        .bind(meal.carbs)
        .bind(meal.fats)
        .bind(meal.date.as_str())
        .bind(&meal.meal_type)
        .bind(meal.updated_at)
        .execute(&self.pool)
        .await?;

        Ok((result.rows_affected() > 0).then_some(meal))
    }

    async fn delete_meal(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn load_profile(&self) -> StoreResult<Option<Profile>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT age, gender, height_feet, height_inches, weight_pounds, activity_level, goal,
                   bmr, daily_calorie_goal, created_at, updated_at
            FROM profile
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        record.map(Profile::try_from).transpose()
    }

    async fn save_profile(&self, profile: &Profile) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profile (id, age, gender, height_feet, height_inches, weight_pounds,
                                 activity_level, goal, bmr, daily_calorie_goal, created_at, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                height_feet = EXCLUDED.height_feet,
                height_inches = EXCLUDED.height_inches,
                weight_pounds = EXCLUDED.weight_pounds,
                activity_level = EXCLUDED.activity_level,
                goal = EXCLUDED.goal,
                bmr = EXCLUDED.bmr,
                daily_calorie_goal = EXCLUDED.daily_calorie_goal,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.age as i32)
        .bind(profile.gender.as_str())
        .bind(profile.height_feet as i32)
        .bind(profile.height_inches as i32)
        .bind(profile.weight_pounds)
        .bind(profile.activity_level.as_str())
        .bind(profile.goal.as_str())
        .bind(profile.bmr)
        .bind(profile.daily_calorie_goal)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(db::ping(&self.pool).await?)
    }
}
