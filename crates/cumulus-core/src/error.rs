//! Error types for Cumulus.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The requested object does not exist in the store.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Transient remote failure (network, store unavailable, throttling).
    #[error("Remote store error: {0}")]
    Remote(String),

    /// A stored payload could not be decoded into a cache entry.
    #[error("Malformed cache entry: {0}")]
    Format(String),

    /// Invalid or incomplete settings detected before any request was made.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl Error {
    /// Whether this error should be treated as an ordinary cache miss
    /// rather than a remote fault.
    pub fn is_miss(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
