use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::memory::MemoryStore;
use crate::database::postgres::PgStore;
use crate::database::store::{Store, StoreError};

/// Errors raised while opening the store at startup
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Unsupported database scheme: {0}")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which backend a connection string selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Postgres,
}

/// Opens the process-wide store once; the handle is shared by every request
pub struct DatabaseManager;

impl DatabaseManager {
    pub fn backend(url: &str) -> Result<Backend, DatabaseError> {
        let parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        match parsed.scheme() {
            "memory" => Ok(Backend::Memory),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            other => Err(DatabaseError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Connect and make sure the collections exist
    pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn Store>, DatabaseError> {
        match Self::backend(&config.url)? {
            Backend::Memory => {
                info!("Using in-memory store");
                Ok(Arc::new(MemoryStore::new()))
            }
            Backend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(config.connection_timeout))
                    .connect(&config.url)
                    .await?;
                let store = PgStore::new(pool);
                store.ensure_schema().await?;
                info!("Connected to Postgres store");
                Ok(Arc::new(store))
            }
        }
    }
}
