//! Attendee entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eventhub_core::types::{AttendeeId, EventId, UserId};

use crate::user::UserSummary;

/// A user's attendance of an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendee {
    /// Unique attendance identifier.
    pub id: AttendeeId,
    /// The attending user.
    pub user_id: UserId,
    /// The attended event.
    pub event_id: EventId,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

/// An attendance record joined with the attending user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendeeWithUser {
    /// The attendance row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attendee: Attendee,
    /// Attendee display name.
    pub user_name: Option<String>,
    /// Attendee email.
    pub user_email: String,
}

impl AttendeeWithUser {
    /// Public projection of the attending user.
    pub fn user(&self) -> UserSummary {
        UserSummary {
            id: self.attendee.user_id,
            name: self.user_name.clone(),
            email: self.user_email.clone(),
        }
    }
}
