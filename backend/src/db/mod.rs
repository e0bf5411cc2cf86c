//! PostgreSQL pool for the `postgres` storage backend

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const APPLICATION_NAME: &str = "meal-tracker";
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("storage.backend is postgres but database.url is not a postgres URL")?;
    Ok(options.application_name(APPLICATION_NAME))
}

/// Open a pool sized by `database.max_connections`
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let options = connect_options(config)?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .context("failed to connect to the meal database")?;

    info!(max_connections = config.max_connections, "Meal database connected");
    Ok(pool)
}

/// Create the `meals` and `profile` tables if they are missing
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Meal database schema up to date");
    Ok(())
}

/// Round-trip a trivial query; used by the readiness check
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!(error = %e, "Meal database ping failed");
            e
        })
}
