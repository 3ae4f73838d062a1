/// The ephemeral vault: write-once-read-once storage for opaque envelopes.
///
/// `store` persists an envelope under a fresh identifier with an absolute
/// expiry; `take` atomically fetches and destroys it. At most one caller
/// ever receives a given entry, and there is no way to extend or re-arm
/// one. The atomicity lives in the backing store (see `store.rs`), so the
/// guarantee survives multiple server processes.
pub mod id;
pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::codec::envelope::Envelope;
use crate::error::{Result, VaultError};
use self::store::VaultStore;

pub struct Vault {
    store: Arc<dyn VaultStore>,
    max_ttl: Duration,
}

impl Vault {
    pub fn new(store: Arc<dyn VaultStore>, max_ttl: Duration) -> Self {
        Self { store, max_ttl }
    }

    pub fn max_ttl(&self) -> Duration {
        self.max_ttl
    }

    /// Store an envelope with the given time-to-live and return its
    /// identifier. Rejects a zero TTL, a TTL above the configured
    /// maximum, and envelopes with empty fields; nothing is written in
    /// those cases.
    pub async fn store(&self, envelope: Envelope, ttl: Duration) -> Result<String> {
        if ttl.is_zero() {
            return Err(VaultError::Validation("ttl must be positive".into()));
        }
        if ttl > self.max_ttl {
            return Err(VaultError::Validation(format!(
                "ttl exceeds the maximum of {} seconds",
                self.max_ttl.as_secs()
            )));
        }
        if envelope.iv.is_empty() || envelope.ciphertext.is_empty() {
            return Err(VaultError::Validation("iv and ciphertext are required".into()));
        }

        let now = Utc::now();
        let lifetime = chrono::Duration::from_std(ttl)
            .map_err(|_| VaultError::Validation("ttl out of range".into()))?;

        let id = id::generate();
        self.store.insert(&id, &envelope, now, now + lifetime).await?;

        tracing::debug!(store = self.store.name(), "stored vault entry");
        Ok(id)
    }

    /// Atomically fetch and destroy the entry for `id`.
    ///
    /// Absent, expired and already-taken all come back as `NotFound`; a
    /// backing-store failure is reported separately and must not be
    /// read as the entry being gone.
    pub async fn take(&self, id: &str) -> Result<Envelope> {
        if !id::is_valid(id) {
            return Err(VaultError::NotFound);
        }
        self.store.take(id).await?.ok_or(VaultError::NotFound)
    }
}
