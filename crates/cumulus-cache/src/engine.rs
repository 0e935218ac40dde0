//! The remote cache engine.

use crate::config::CacheSettings;
use crate::fallback::{FallbackCoordinator, MemoryStore};
use crate::s3::S3ObjectStore;
use async_trait::async_trait;
use chrono::Utc;
use cumulus_core::{
    CacheEntry, DistributedCache, EntryOptions, Error, ObjectStore, Result, codec, encode_key,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Where a `set` actually landed. The public contract stays error-free;
/// this is the observable degradation signal for callers that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The entry reached the remote store (and the fallback mirror).
    Remote,
    /// The remote write failed; only the fallback mirror holds the entry.
    FallbackOnly,
}

/// Cache engine orchestrating bucket provisioning and the four cache
/// operations against an object store, with transparent fallback.
///
/// Remote failures never escape: `get` degrades to the fallback mirror,
/// the write operations log and absorb them.
pub struct RemoteCache {
    store: Arc<dyn ObjectStore>,
    fallback: FallbackCoordinator,
    bucket: String,
    // One-shot provisioning guard. Memoizes success only, so a failed
    // attempt is retried by the next operation. Externally deleting the
    // bucket after provisioning goes undetected for the engine's lifetime.
    provisioned: OnceCell<()>,
}

impl RemoteCache {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        fallback: FallbackCoordinator,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            store,
            fallback,
            bucket: bucket.into(),
            provisioned: OnceCell::new(),
        }
    }

    /// Build an engine from settings: S3 adapter plus, unless disabled,
    /// an in-memory fallback mirror.
    pub fn connect(settings: &CacheSettings) -> Result<Self> {
        let store = Arc::new(S3ObjectStore::new(settings)?);
        let fallback = if settings.use_fallback_cache {
            FallbackCoordinator::new(Arc::new(MemoryStore::new()))
        } else {
            FallbackCoordinator::disabled()
        };
        Ok(Self::new(store, fallback, settings.bucket_name.clone()))
    }

    /// Best-effort bucket provisioning. Failure is logged, never raised:
    /// the operation that follows will fail against the missing bucket and
    /// be absorbed by its own failure handling.
    async fn ensure_bucket(&self) {
        let provisioning = self
            .provisioned
            .get_or_try_init(|| async {
                if self.store.bucket_exists(&self.bucket).await? {
                    return Ok(());
                }
                debug!(bucket = %self.bucket, "Creating cache bucket");
                self.store.create_bucket(&self.bucket).await
            })
            .await;

        if let Err(err) = provisioning {
            warn!(bucket = %self.bucket, error = %err, "Bucket provisioning failed; continuing");
        }
    }

    async fn fetch_entry(&self, name: &str) -> Result<CacheEntry> {
        let body = self.store.get(&self.bucket, name).await?;
        codec::deserialize(&body)
    }

    /// Fetch a cached value. Any remote failure degrades to the fallback
    /// mirror; a decoded-but-expired entry is purged and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.ensure_bucket().await;
        let name = encode_key(key);

        match self.fetch_entry(&name).await {
            Ok(entry) => {
                if entry.is_expired(Utc::now()) {
                    debug!(key, "Entry expired; purging");
                    self.remove(key).await;
                    return None;
                }
                Some(entry.value)
            }
            Err(err) => {
                match &err {
                    Error::NotFound(_) => debug!(key, "Remote miss"),
                    Error::Format(msg) => {
                        warn!(key, error = %msg, "Corrupt cache entry; deleting object");
                        if let Err(del) = self.store.delete(&self.bucket, &name).await {
                            debug!(key, error = %del, "Could not delete corrupt object");
                        }
                    }
                    other => warn!(key, error = %other, "Remote get failed; trying fallback"),
                }
                self.fallback.get(key).await
            }
        }
    }

    /// Store a value, reporting where the write landed. The fallback mirror
    /// is always updated afterward, whatever the remote outcome.
    pub async fn set(&self, key: &str, value: Vec<u8>, options: &EntryOptions) -> WriteOutcome {
        self.ensure_bucket().await;
        let name = encode_key(key);
        let entry = CacheEntry::new(value.clone(), options, Utc::now());

        let outcome = match codec::serialize(&entry) {
            Ok(body) => {
                match self
                    .store
                    .put(&self.bucket, &name, body, codec::CONTENT_TYPE)
                    .await
                {
                    Ok(()) => WriteOutcome::Remote,
                    Err(err) => {
                        warn!(key, error = %err, "Remote write failed; entry held in fallback only");
                        WriteOutcome::FallbackOnly
                    }
                }
            }
            Err(err) => {
                warn!(key, error = %err, "Entry serialization failed; entry held in fallback only");
                WriteOutcome::FallbackOnly
            }
        };

        self.fallback.set(key, value, options).await;
        outcome
    }

    /// Re-anchor a live entry's sliding window. Absent entries are left
    /// absent, expired entries are purged, and write failures are swallowed.
    pub async fn refresh(&self, key: &str) {
        self.ensure_bucket().await;
        let name = encode_key(key);

        match self.fetch_entry(&name).await {
            Ok(mut entry) => {
                let now = Utc::now();
                if entry.is_expired(now) {
                    debug!(key, "Entry expired on refresh; purging");
                    self.remove(key).await;
                    return;
                }
                entry.touch(now);
                match codec::serialize(&entry) {
                    Ok(body) => {
                        if let Err(err) = self
                            .store
                            .put(&self.bucket, &name, body, codec::CONTENT_TYPE)
                            .await
                        {
                            warn!(key, error = %err, "Refresh write failed");
                        }
                    }
                    Err(err) => warn!(key, error = %err, "Refresh serialization failed"),
                }
            }
            Err(err) if err.is_miss() => debug!(key, "Nothing to refresh"),
            Err(err) => warn!(key, error = %err, "Refresh fetch failed"),
        }
    }

    /// Delete an entry from the remote store and the fallback mirror.
    /// Idempotent; remote failures are logged and absorbed.
    pub async fn remove(&self, key: &str) {
        self.ensure_bucket().await;
        let name = encode_key(key);

        if let Err(err) = self.store.delete(&self.bucket, &name).await {
            warn!(key, error = %err, "Remote delete failed");
        }
        self.fallback.remove(key).await;
    }
}

#[async_trait]
impl DistributedCache for RemoteCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        RemoteCache::get(self, key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, options: EntryOptions) {
        RemoteCache::set(self, key, value, &options).await;
    }

    async fn refresh(&self, key: &str) {
        RemoteCache::refresh(self, key).await;
    }

    async fn remove(&self, key: &str) {
        RemoteCache::remove(self, key).await;
    }
}
