//! # eventhub-storage
//!
//! Media storage for EventHub banner images. Supports the local filesystem
//! and, behind the `s3` feature, S3-compatible object stores.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
