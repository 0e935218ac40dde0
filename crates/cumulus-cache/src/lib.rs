//! Cumulus cache engine (S3/MinIO compatible).
//!
//! Orchestrates the four cache operations against an S3-compatible object
//! store, mirroring every write into a process-local fallback store so reads
//! stay available when the remote store is unreachable. The public surface
//! is error-free: callers see hits, misses, and completed writes, never
//! transport failures.

pub mod blocking;
pub mod config;
pub mod engine;
pub mod fallback;
pub mod s3;

pub use blocking::BlockingCache;
pub use config::CacheSettings;
pub use engine::{RemoteCache, WriteOutcome};
pub use fallback::{FallbackCoordinator, MemoryStore};
pub use s3::S3ObjectStore;
