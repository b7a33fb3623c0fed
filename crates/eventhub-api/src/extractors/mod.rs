//! Custom Axum extractors.

pub mod auth;
pub mod client;
pub mod path;
pub mod validated;

pub use auth::AuthUser;
pub use client::ClientIp;
pub use path::EventPath;
pub use validated::{ValidatedJson, ValidatedQuery};
