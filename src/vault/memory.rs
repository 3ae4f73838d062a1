/// In-memory vault store for local runs and tests.
///
/// A single mutex guards the map, so fetch-and-delete is atomic within
/// the process. Expiry follows the same predicate as the Postgres store:
/// entries past `expires_at` are invisible to `take` and swept on insert.
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::store::VaultStore;
use crate::codec::envelope::Envelope;
use crate::error::Result;

struct Entry {
    envelope: Envelope,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct MemoryVaultStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryVaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }
}

#[async_trait]
impl VaultStore for MemoryVaultStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(
        &self,
        id: &str,
        envelope: &Envelope,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            id.to_string(),
            Entry {
                envelope: envelope.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn take(&self, id: &str) -> Result<Option<Envelope>> {
        let now = Utc::now();
        // An expired entry is removed here too; post-take and post-expiry
        // are indistinguishable to callers.
        match self.lock().remove(id) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.envelope)),
            _ => Ok(None),
        }
    }
}
