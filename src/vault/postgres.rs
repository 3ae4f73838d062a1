/// PostgreSQL-backed vault store.
///
/// The read-once guarantee rides on a single `DELETE .. RETURNING`
/// statement: row deletion in Postgres picks exactly one winner between
/// concurrent `take` calls, so the guarantee holds across independent
/// server processes without any application-level locking.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;

use super::store::VaultStore;
use crate::codec::envelope::Envelope;
use crate::error::Result;
use crate::state::Database;

pub struct PostgresVaultStore {
    db: Database,
}

impl PostgresVaultStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VaultStore for PostgresVaultStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn insert(
        &self,
        id: &str,
        envelope: &Envelope,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        // Sweep entries that expired unread. Piggybacking on the write path
        // keeps the table bounded without a background task; expired rows
        // are already invisible to `take` either way.
        sqlx::query("DELETE FROM vault_entries WHERE expires_at <= $1")
            .bind(now)
            .execute(self.db.pool())
            .await?;

        sqlx::query(
            r#"
            INSERT INTO vault_entries (id, envelope, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(Json(envelope))
        .bind(now)
        .bind(expires_at)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    async fn take(&self, id: &str) -> Result<Option<Envelope>> {
        let row: Option<(Json<Envelope>,)> = sqlx::query_as(
            r#"
            DELETE FROM vault_entries
            WHERE id = $1 AND expires_at > now()
            RETURNING envelope
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|(Json(envelope),)| envelope))
    }
}
