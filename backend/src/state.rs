//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Build storage once**: the store chain is assembled at startup
//! 2. **Cheap cloning**: All fields are Arc'd
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::config::{AppConfig, StorageBackend};
use crate::db;
use crate::storage::{FallbackStore, LocalStore, MemoryStore, PgStore, RemoteStore, Store};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Meal and profile storage
    pub store: Arc<dyn Store>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state around an existing store
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Build the store chain described by the configuration
    ///
    /// With `storage.remote_url` set, the remote API is the primary store
    /// and the configured backend serves as its fallback.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let local: Arc<dyn Store> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Local => Arc::new(LocalStore::open(&config.storage.data_dir).await?),
            StorageBackend::Postgres => {
                info!("Connecting to database...");
                let pool = db::connect(&config.database).await?;
                // Skip in production if using separate migration job
                if !AppConfig::is_production() {
                    db::migrate(&pool).await?;
                }
                Arc::new(PgStore::new(pool))
            }
        };

        let store: Arc<dyn Store> = match config.remote_url() {
            Some(url) => {
                info!(remote = %url, fallback = local.name(), "Using remote store with fallback");
                let timeout = Duration::from_secs(config.storage.remote_timeout_secs);
                let remote = RemoteStore::new(url, timeout)?;
                Arc::new(FallbackStore::new(Arc::new(remote), local))
            }
            None => local,
        };

        info!(store = store.name(), "Storage ready");
        Ok(Self::new(store, config))
    }

    /// Get a reference to the store
    #[inline]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
