//! Account domain events.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Registration and session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountEvent {
    /// A new account was registered.
    Registered {
        /// The new user.
        user_id: UserId,
        /// The registered email.
        email: String,
    },
    /// A user logged in.
    LoggedIn {
        /// The user.
        user_id: UserId,
        /// Client IP address, when known.
        ip_address: Option<String>,
    },
    /// A user logged out.
    LoggedOut {
        /// The user.
        user_id: UserId,
    },
}

impl AccountEvent {
    /// Short dotted name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "user.registered",
            Self::LoggedIn { .. } => "user.logged_in",
            Self::LoggedOut { .. } => "user.logged_out",
        }
    }
}
