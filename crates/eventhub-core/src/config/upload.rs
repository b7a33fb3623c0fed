//! Banner upload limits.

use serde::{Deserialize, Serialize};

/// Limits applied to banner uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum banner size in bytes (default 5 MB).
    #[serde(default = "default_max_banner_bytes")]
    pub max_banner_bytes: u64,
    /// Accepted MIME types.
    #[serde(default = "default_allowed_content_types")]
    pub allowed_content_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_banner_bytes: default_max_banner_bytes(),
            allowed_content_types: default_allowed_content_types(),
        }
    }
}

fn default_max_banner_bytes() -> u64 {
    5_242_880 // 5 MB
}

fn default_allowed_content_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/webp".to_string(),
        "image/gif".to_string(),
    ]
}
