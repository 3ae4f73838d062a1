/// Database layer for sealbox.
///
/// Holds the PostgreSQL connection pool with an explicit lifecycle:
/// connected once at startup, migrated, then shared by every request.
/// Nothing re-creates a connection per call and nothing reaches for an
/// ambient global.
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::{Result, VaultError};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| VaultError::Infrastructure(format!("migration failed: {e}")))
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
