//! Fallback coordination and the in-memory mirror store.
//!
//! Every write to the remote store is shadowed here so that reads keep
//! working when the remote path fails. The mirror expires independently:
//! the entry options are translated once, at write time, into a plain TTL
//! the local store understands.

use cumulus_core::{EntryOptions, FallbackStore};
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Mirrors cache writes and removals into a local store, and serves reads
/// from it when the remote path fails. Disabled mode (no store supplied)
/// is resolved once at construction: every method becomes a no-op/miss.
pub struct FallbackCoordinator {
    store: Option<Arc<dyn FallbackStore>>,
}

impl FallbackCoordinator {
    pub fn new(store: Arc<dyn FallbackStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let store = self.store.as_ref()?;
        store.get(key).await
    }

    pub async fn set(&self, key: &str, value: Vec<u8>, options: &EntryOptions) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        match mirror_ttl(options, chrono::Utc::now()) {
            Some(ttl) => store.set(key, value, ttl).await,
            None => {
                // Already past its absolute deadline; mirroring it would
                // serve an expired value.
                debug!(key, "Skipping fallback mirror of expired entry");
            }
        }
    }

    pub async fn remove(&self, key: &str) {
        if let Some(store) = self.store.as_ref() {
            store.remove(key).await;
        }
    }
}

/// Translate entry options into the mirror's TTL. Outer `None` means the
/// entry is already expired and must not be mirrored at all; inner `None`
/// means no TTL (the store's own eviction policy applies).
fn mirror_ttl(
    options: &EntryOptions,
    now: chrono::DateTime<chrono::Utc>,
) -> Option<Option<Duration>> {
    let remaining = match options.absolute_expiration {
        Some(at) if at <= now => return None,
        Some(at) => (at - now).to_std().ok(),
        None => None,
    };

    Some(match (options.sliding_expiration, remaining) {
        (Some(window), Some(until_deadline)) => Some(window.min(until_deadline)),
        (Some(window), None) => Some(window),
        (None, remaining) => remaining,
    })
}

#[derive(Clone)]
struct Mirrored {
    value: Vec<u8>,
    ttl: Option<Duration>,
}

struct MirroredExpiry;

impl Expiry<String, Mirrored> for MirroredExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Mirrored,
        _created_at: Instant,
    ) -> Option<Duration> {
        entry.ttl
    }
}

/// In-process `FallbackStore` backed by moka, with per-entry TTLs.
pub struct MemoryStore {
    cache: Cache<String, Mirrored>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().expire_after(MirroredExpiry).build(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FallbackStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.cache.get(key).await.map(|m| m.value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) {
        self.cache
            .insert(key.to_string(), Mirrored { value, ttl })
            .await;
    }

    async fn remove(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}
