use std::{fmt, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::database::infrastructure::postgres::repositories::{
    admin::{PostgresAllowList, PostgresIdentityProvider},
    catalog::PostgresCatalogRepository,
};
use crate::error::{CatalogError, Result};

/// Pool sizing for [`PostgresDatabase::connect`].
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Shared connection pool plus the repositories built on top of it.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    settings: PoolSettings,
    catalog: PostgresCatalogRepository,
    identity: PostgresIdentityProvider,
    allow_list: PostgresAllowList,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("max_connections", &self.settings.max_connections)
            .field("min_connections", &self.settings.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn connect(connection_string: &str, settings: PoolSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(connection_string)
            .await
            .map_err(|e| CatalogError::Fetch(format!("Database connection failed: {e}")))?;

        info!(
            max_connections = settings.max_connections,
            min_connections = settings.min_connections,
            "database pool initialized"
        );

        Ok(Self::from_pool(pool, settings))
    }

    pub fn from_pool(pool: PgPool, settings: PoolSettings) -> Self {
        Self {
            catalog: PostgresCatalogRepository::new(pool.clone()),
            identity: PostgresIdentityProvider::new(pool.clone()),
            allow_list: PostgresAllowList::new(pool.clone()),
            pool,
            settings,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn catalog(&self) -> &PostgresCatalogRepository {
        &self.catalog
    }

    pub fn identity(&self) -> &PostgresIdentityProvider {
        &self.identity
    }

    pub fn allow_list(&self) -> &PostgresAllowList {
        &self.allow_list
    }

    /// Applies the embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CatalogError::Internal(format!("Migration failed: {e}")))?;

        info!("database schema up to date");
        Ok(())
    }
}
