//! Synchronous facade over the async engine.

use crate::config::CacheSettings;
use crate::engine::{RemoteCache, WriteOutcome};
use cumulus_core::{EntryOptions, Result};

/// A `RemoteCache` driven by a private runtime, for callers without an
/// async context. Must not be used from inside a tokio runtime.
pub struct BlockingCache {
    inner: RemoteCache,
    runtime: tokio::runtime::Runtime,
}

impl BlockingCache {
    pub fn connect(settings: &CacheSettings) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            inner: RemoteCache::connect(settings)?,
            runtime,
        })
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.runtime.block_on(self.inner.get(key))
    }

    pub fn set(&self, key: &str, value: Vec<u8>, options: &EntryOptions) -> WriteOutcome {
        self.runtime.block_on(self.inner.set(key, value, options))
    }

    pub fn refresh(&self, key: &str) {
        self.runtime.block_on(self.inner.refresh(key))
    }

    pub fn remove(&self, key: &str) {
        self.runtime.block_on(self.inner.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_builds_without_io() {
        assert!(BlockingCache::connect(&CacheSettings::default()).is_ok());
    }
}
