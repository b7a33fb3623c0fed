//! Storage manager: the configured provider plus public URL mapping.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use eventhub_core::config::{StorageConfig, StorageProviderKind};
use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_core::traits::storage::StorageProvider;

use crate::providers::LocalStorageProvider;

/// Prefix under which banner objects are stored.
pub const BANNER_PREFIX: &str = "events";

/// Length of the random part of generated object names.
const RANDOM_NAME_LEN: usize = 12;

/// Owns the active storage provider and translates between storage keys
/// and the public URLs stored on events.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn StorageProvider>,
    public_base_url: String,
}

impl StorageManager {
    /// Wrap an existing provider.
    pub fn new(provider: Arc<dyn StorageProvider>, public_base_url: &str) -> Self {
        Self {
            provider,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the provider selected in configuration.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let provider: Arc<dyn StorageProvider> = match config.provider {
            StorageProviderKind::Local => {
                Arc::new(LocalStorageProvider::new(&config.local.root_path).await?)
            }
            #[cfg(feature = "s3")]
            StorageProviderKind::S3 => {
                Arc::new(crate::providers::S3StorageProvider::new(&config.s3).await?)
            }
            #[cfg(not(feature = "s3"))]
            StorageProviderKind::S3 => {
                return Err(AppError::configuration(
                    "S3 storage requested but eventhub-storage was built without the `s3` feature",
                ));
            }
        };

        info!(
            provider = provider.provider_type(),
            public_base_url = %config.public_base_url,
            "Storage provider initialized"
        );
        Ok(Self::new(provider, &config.public_base_url))
    }

    /// Generate a fresh banner key such as `events/events_3fa9c1d2b7e0.png`.
    pub fn banner_key(extension: &str) -> String {
        let random = Uuid::new_v4().simple().to_string();
        format!(
            "{BANNER_PREFIX}/{BANNER_PREFIX}_{}.{extension}",
            &random[..RANDOM_NAME_LEN]
        )
    }

    /// Public URL of a stored key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key.trim_start_matches('/'))
    }

    /// Recover the storage key from a public URL produced by
    /// [`StorageManager::public_url`]. Foreign URLs yield `None`.
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.public_base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    /// Store an object.
    pub async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.provider.write(key, data, content_type).await
    }

    /// Fetch an object.
    pub async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.provider.read_bytes(key).await
    }

    /// Delete an object.
    pub async fn remove(&self, key: &str) -> AppResult<()> {
        self.provider.delete(key).await
    }

    /// Delete the object behind a public URL, if it belongs to this store.
    pub async fn remove_url(&self, url: &str) -> AppResult<()> {
        match self.key_from_url(url) {
            Some(key) => self.remove(&key).await,
            None => Err(AppError::not_found(format!("Not a stored object URL: {url}"))),
        }
    }

    /// Check provider health.
    pub async fn health_check(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }
}
