//! Meal Tracker Backend
//!
//! Meal logging with a calorie goal derived from the user's profile.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business logic over the shared meal tracker core
//! - Storage: memory, local JSON files, PostgreSQL or a remote instance

use anyhow::Result;
use chrono::Utc;
use meal_tracker_backend::{
    config::{self, StorageBackend},
    routes,
    services::MealService,
    state::AppState,
};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Meal Tracker Backend"
    );

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config);
    }

    // Create application state
    let seed = config.storage.seed_sample_data;
    let state = AppState::from_config(config.clone()).await?;

    if seed {
        let now = Utc::now();
        MealService::seed_sample_data(state.store(), now.date_naive(), now).await?;
    }

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "meal_tracker_backend=info,tower_http=info".into()
        } else {
            "meal_tracker_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Warn about settings that look like development leftovers
fn validate_production_config(config: &config::AppConfig) {
    let db_url = &config.database.url;
    if config.storage.backend == StorageBackend::Postgres
        && (db_url.contains("localhost") || db_url.contains("127.0.0.1"))
    {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    if config.storage.backend == StorageBackend::Memory {
        warn!("Memory storage loses all meals on restart");
    }

    if config.storage.seed_sample_data {
        warn!("Sample meals are seeded into an empty store");
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
