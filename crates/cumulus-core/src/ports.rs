//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the cache engine and its
//! external adapters: the remote object store, the local fallback store,
//! and the cache surface consumers program against.

use crate::entry::EntryOptions;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// An S3-compatible object store, reduced to the five calls the cache needs.
///
/// Implementations map their transport errors into the crate taxonomy:
/// a missing object on `get` is `Error::NotFound`, everything else that
/// goes wrong on the wire is `Error::Remote`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, replacing any previous body.
    async fn put(&self, bucket: &str, name: &str, body: Vec<u8>, content_type: &str)
    -> Result<()>;

    /// Read an object body. `Error::NotFound` when the object is absent.
    async fn get(&self, bucket: &str, name: &str) -> Result<Vec<u8>>;

    /// Delete an object. Deleting a missing object is Ok (idempotent).
    async fn delete(&self, bucket: &str, name: &str) -> Result<()>;

    /// Whether the bucket exists.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Create the bucket. An already-existing bucket is Ok, so concurrent
    /// first-use races collapse into a no-op.
    async fn create_bucket(&self, bucket: &str) -> Result<()>;
}

/// A process-local store with its own TTL mechanism, mirrored behind the
/// remote store to keep reads available when the remote path fails.
#[async_trait]
pub trait FallbackStore: Send + Sync {
    /// Look up a mirrored value.
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value, expiring after `ttl` when given; without a TTL the
    /// value lives until evicted by the store's own policy.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>);

    /// Remove a mirrored value. Idempotent.
    async fn remove(&self, key: &str);
}

/// The public cache surface.
///
/// Deliberately error-free: callers only ever observe hits, misses, and
/// completed writes. Remote failures are absorbed by the implementation.
#[async_trait]
pub trait DistributedCache: Send + Sync {
    /// Fetch a cached value. `None` is a miss, whether the entry is absent,
    /// expired, or unreachable.
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value under `key` with the given expiration options.
    async fn set(&self, key: &str, value: Vec<u8>, options: EntryOptions);

    /// Re-anchor a sliding-expiration entry without reading its value.
    /// Never creates or resurrects an entry.
    async fn refresh(&self, key: &str);

    /// Remove an entry. Idempotent.
    async fn remove(&self, key: &str);
}
