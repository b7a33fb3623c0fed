//! Storage provider trait for pluggable media backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for object storage backends holding banner images.
///
/// Keys are slash-separated relative paths such as
/// `events/events_3fa9c1d2b7e0.png`. Implementations for the local
/// filesystem and S3-compatible stores live in `eventhub-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read an object into memory.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Write an object, replacing any existing one under the same key.
    async fn write(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
