//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventhub_core::types::UserId;
use eventhub_entity::user::UserSummary;

/// Context for the current authenticated request.
///
/// Built by the session middleware and passed into service methods so that
/// every operation knows *who* is acting and from *which* session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The current session ID (hashed token).
    pub session_id: String,
    /// The user's email.
    pub email: String,
    /// The user's display name.
    pub name: Option<String>,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: UserId,
        session_id: String,
        email: String,
        name: Option<String>,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            email,
            name,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// The acting user's public summary.
    pub fn user_summary(&self) -> UserSummary {
        UserSummary {
            id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
