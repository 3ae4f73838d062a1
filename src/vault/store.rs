/// Pluggable backing stores for the ephemeral vault.
///
/// All mutation of vault state goes through this trait; no other code
/// path writes or deletes entries. Implementations must make `take`
/// atomic in the backing store itself, not with in-process locks the
/// way a single-process cache would, because several server processes
/// may front the same store.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::codec::envelope::Envelope;
use crate::error::Result;

#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Human-readable name of this store (e.g. "postgres", "memory").
    fn name(&self) -> &str;

    /// Persist a new entry. All-or-nothing: the envelope and its expiry
    /// are written in one step or not at all. Never overwrites an
    /// existing identifier.
    async fn insert(
        &self,
        id: &str,
        envelope: &Envelope,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Atomically remove and return the entry for `id`, provided it has
    /// not expired. Exactly one concurrent caller observes `Some`; absent,
    /// expired and already-taken entries are all `None`.
    async fn take(&self, id: &str) -> Result<Option<Envelope>>;
}
