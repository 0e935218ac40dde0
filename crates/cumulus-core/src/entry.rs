//! The cache entry model and expiration evaluation.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Caller-facing expiration options for a `set` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryOptions {
    /// Hard expiry independent of access.
    pub absolute_expiration: Option<DateTime<Utc>>,
    /// Expiry measured from the last write or refresh.
    pub sliding_expiration: Option<Duration>,
}

impl EntryOptions {
    /// Options with neither expiration set: the entry never expires on its
    /// own and lives until explicitly removed.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn absolute(at: DateTime<Utc>) -> Self {
        Self {
            absolute_expiration: Some(at),
            ..Self::default()
        }
    }

    pub fn sliding(window: Duration) -> Self {
        Self {
            sliding_expiration: Some(window),
            ..Self::default()
        }
    }
}

/// The unit persisted per key: the opaque payload plus its expiration
/// metadata. Serialized whole, so a stored object is never partially written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    /// The cached payload. Never inspected by the cache itself.
    #[serde(with = "crate::codec::base64_bytes")]
    pub value: Vec<u8>,
    /// Anchor for sliding expiration; bumped forward on refresh.
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_expiration: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sliding_expiration: Option<Duration>,
}

impl CacheEntry {
    /// Build a fresh entry with `created_at = now`.
    pub fn new(value: Vec<u8>, options: &EntryOptions, now: DateTime<Utc>) -> Self {
        Self {
            value,
            created_at: now,
            absolute_expiration: options.absolute_expiration,
            sliding_expiration: options.sliding_expiration,
        }
    }

    /// Whether the entry has expired at `now`. An entry is expired when
    /// EITHER expiration condition holds; both boundaries are inclusive.
    /// An entry with neither field set never expires here.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        if let Some(at) = self.absolute_expiration {
            if now >= at {
                return true;
            }
        }
        if let Some(window) = self.sliding_expiration {
            // A window too large for chrono arithmetic is a deadline in the
            // unreachable future, not an expired entry.
            if let Ok(window) = ChronoDuration::from_std(window) {
                if let Some(deadline) = self.created_at.checked_add_signed(window) {
                    if now >= deadline {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Bump `created_at` for sliding expiration. The anchor only ever moves
    /// forward, so a racing refresh with a stale clock cannot shorten the
    /// entry's remaining lifetime.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.created_at {
            self.created_at = now;
        }
    }
}
