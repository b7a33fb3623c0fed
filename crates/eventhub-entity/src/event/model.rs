//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eventhub_core::types::{EventId, UserId};

use crate::user::UserSummary;

/// A published event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub location: Option<String>,
    /// Public URL of the banner image.
    pub banner_url: Option<String>,
    /// Attendance limit; `None` means unlimited.
    pub max_attendees: Option<i32>,
    /// The owning user.
    pub created_by: UserId,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether `user_id` owns this event.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.created_by == user_id
    }
}

/// An event joined with its creator and attendee count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventWithStats {
    /// The event row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    /// Creator display name.
    pub creator_name: Option<String>,
    /// Creator email.
    pub creator_email: String,
    /// Number of attendance records.
    pub attendee_count: i64,
}

impl EventWithStats {
    /// Public projection of the creator.
    pub fn creator(&self) -> UserSummary {
        UserSummary {
            id: self.event.created_by,
            name: self.creator_name.clone(),
            email: self.creator_email.clone(),
        }
    }
}

/// Data required to create a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Date; must lie in the future.
    pub date: DateTime<Utc>,
    /// Location.
    pub location: Option<String>,
    /// Attendance limit.
    pub max_attendees: Option<i32>,
    /// The owner.
    pub created_by: UserId,
}
