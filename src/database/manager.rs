use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::memory::MemoryCakeStore;
use crate::database::postgres::PgCakeStore;
use crate::database::store::{CakeStore, StoreError};

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Unsupported database scheme: {0}")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Store backends reachable through a connection string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Postgres,
}

/// Builds the cakes store once at startup from the configured connection string
pub struct DatabaseManager;

impl DatabaseManager {
    /// Resolve which backend a connection string points at
    pub fn store_kind(connection_string: &str) -> Result<StoreKind, DatabaseError> {
        let url = url::Url::parse(connection_string).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        match url.scheme() {
            "memory" => Ok(StoreKind::Memory),
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            other => Err(DatabaseError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Connect to the configured store, creating the collection if needed
    pub async fn connect(
        connection_string: Option<&str>,
        config: &DatabaseConfig,
    ) -> Result<Arc<dyn CakeStore>, DatabaseError> {
        let connection_string = connection_string.ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        match Self::store_kind(connection_string)? {
            StoreKind::Memory => {
                info!("Using in-memory cake store");
                Ok(Arc::new(MemoryCakeStore::new()))
            }
            StoreKind::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(config.connection_timeout))
                    .connect(connection_string)
                    .await?;

                let store = PgCakeStore::new(pool);
                store.ensure_schema().await?;

                info!(
                    max_connections = config.max_connections,
                    "Created database pool for cakes store"
                );
                Ok(Arc::new(store))
            }
        }
    }
}
