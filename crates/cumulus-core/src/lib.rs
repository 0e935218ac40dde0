//! Cumulus Core
//!
//! Core domain types, traits, and error handling for the Cumulus
//! distributed cache. This crate has minimal dependencies and defines the
//! shared vocabulary used by the cache engine and its adapters.

pub mod codec;
pub mod entry;
pub mod error;
pub mod keys;
pub mod ports;

pub use entry::{CacheEntry, EntryOptions};
pub use error::{Error, Result};
pub use keys::encode_key;
pub use ports::{DistributedCache, FallbackStore, ObjectStore};
