//! Session cookie configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest session lifetime accepted, in days.
pub const MAX_SESSION_TTL_DAYS: u64 = 365;

/// Session lifetime and cookie attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in days. Sessions are extended back to the full
    /// lifetime once less than half of it remains.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u64,
    /// Whether the cookie carries the `Secure` attribute.
    #[serde(default = "default_secure_cookie")]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_days: default_ttl_days(),
            secure_cookie: default_secure_cookie(),
        }
    }
}

impl SessionConfig {
    /// Reject lifetimes outside `1..=MAX_SESSION_TTL_DAYS`.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_SESSION_TTL_DAYS).contains(&self.ttl_days) {
            return Err(AppError::configuration(format!(
                "session.ttl_days must be between 1 and {MAX_SESSION_TTL_DAYS}, got {}",
                self.ttl_days
            )));
        }
        Ok(())
    }
}

fn default_cookie_name() -> String {
    "auth_session".to_string()
}

fn default_ttl_days() -> u64 {
    30
}

fn default_secure_cookie() -> bool {
    true
}
