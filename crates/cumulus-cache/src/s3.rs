//! S3-compatible object store adapter.

use crate::config::CacheSettings;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use cumulus_core::{Error, ObjectStore, Result};

const DEFAULT_REGION: &str = "us-east-1";

/// `ObjectStore` over the AWS S3 SDK, configured for S3-compatible stores
/// (MinIO and friends): static credentials, custom endpoint, path-style
/// addressing.
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(settings: &CacheSettings) -> Result<Self> {
        if settings.endpoint.is_empty() {
            return Err(Error::Configuration("endpoint must not be empty".into()));
        }

        let region = settings
            .region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let credentials = Credentials::new(
            settings.access_key.clone(),
            settings.secret_key.clone(),
            None,
            None,
            "cumulus-settings",
        );

        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region))
            .endpoint_url(settings.endpoint_url())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(conf),
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        bucket: &str,
        name: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(name)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, bucket: &str, name: &str) -> Result<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(name)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    Error::NotFound(name.to_string())
                } else {
                    Error::Remote(e.to_string())
                }
            })?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;
        Ok(body.into_bytes().to_vec())
    }

    async fn delete(&self, bucket: &str, name: &str) -> Result<()> {
        // S3 DeleteObject succeeds for missing keys, which gives us the
        // idempotent delete the engine relies on.
        self.client
            .delete_object()
            .bucket(bucket)
            .key(name)
            .send()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;
        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(Error::Remote(e.to_string())),
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        match self.client.create_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(()),
            // Concurrent first-use: another caller won the create race.
            Err(e)
                if e.as_service_error().is_some_and(|se| {
                    se.is_bucket_already_owned_by_you() || se.is_bucket_already_exists()
                }) =>
            {
                Ok(())
            }
            Err(e) => Err(Error::Remote(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_endpoint() {
        let settings = CacheSettings {
            endpoint: String::new(),
            ..CacheSettings::default()
        };
        assert!(matches!(
            S3ObjectStore::new(&settings),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_builds_client_from_default_settings() {
        assert!(S3ObjectStore::new(&CacheSettings::default()).is_ok());
    }
}
