//! Event banner images.

pub mod format;
pub mod service;

pub use format::BannerFormat;
pub use service::{BannerFile, BannerService, validate_banner};
