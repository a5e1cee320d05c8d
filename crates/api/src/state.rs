use std::sync::Arc;

use atelier_storage::StorageProvider;
use sqlx::PgPool;

use crate::config::ServerConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upload storage backend (local disk or S3).
    pub storage: Arc<dyn StorageProvider>,
}

impl AppState {
    pub fn new(pool: PgPool, config: ServerConfig, storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            storage,
        }
    }
}
