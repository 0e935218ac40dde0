//! Cache settings.

use cumulus_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Immutable settings resolved once before engine construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Object store endpoint, host:port (scheme derived from `use_tls`)
    /// or a full URL.
    pub endpoint: String,
    /// Access key for the store.
    pub access_key: String,
    /// Secret key for the store.
    pub secret_key: String,
    /// Bucket holding the cache objects.
    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,
    /// Whether to talk to the endpoint over TLS.
    #[serde(default)]
    pub use_tls: bool,
    /// Store region, when the deployment cares about one.
    #[serde(default)]
    pub region: Option<String>,
    /// Whether writes are mirrored into the in-process fallback cache.
    #[serde(default = "default_use_fallback")]
    pub use_fallback_cache: bool,
}

fn default_bucket_name() -> String {
    "aspnetcore-distributed-cache".to_string()
}

fn default_use_fallback() -> bool {
    true
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            endpoint: "localhost:9000".to_string(),
            access_key: String::new(),
            secret_key: String::new(),
            bucket_name: default_bucket_name(),
            use_tls: false,
            region: None,
            use_fallback_cache: default_use_fallback(),
        }
    }
}

impl CacheSettings {
    /// Load settings from `CUMULUS_*` environment variables
    /// (e.g. `CUMULUS_ENDPOINT`, `CUMULUS_ACCESS_KEY`).
    pub fn from_env() -> Result<Self> {
        let loaded = config::Config::builder()
            .add_source(config::Environment::with_prefix("CUMULUS"))
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        loaded
            .try_deserialize()
            .map_err(|e| Error::Configuration(e.to_string()))
    }

    /// The full endpoint URL handed to the store client.
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else if self.use_tls {
            format!("https://{}", self.endpoint)
        } else {
            format!("http://{}", self.endpoint)
        }
    }
}
