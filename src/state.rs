//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::azure::{BlobStore, CloudServiceAdapter};
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Redis connection manager
    pub redis: ConnectionManager,

    /// Image storage, absent when no storage account is configured
    pub blob_store: Option<Arc<dyn BlobStore>>,

    /// Hosted service management, absent without a subscription
    pub cloud_services: Option<Arc<CloudServiceAdapter>>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        redis: ConnectionManager,
        blob_store: Option<Arc<dyn BlobStore>>,
        cloud_services: Option<Arc<CloudServiceAdapter>>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                redis,
                blob_store,
                cloud_services,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a clone of the Redis connection manager
    pub fn redis(&self) -> ConnectionManager {
        self.inner.redis.clone()
    }

    /// Get the blob store, if configured
    pub fn blob_store(&self) -> Option<&dyn BlobStore> {
        self.inner.blob_store.as_deref()
    }

    /// Get the cloud service adapter, if configured
    pub fn cloud_services(&self) -> Option<&CloudServiceAdapter> {
        self.inner.cloud_services.as_deref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
