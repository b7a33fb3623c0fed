//! Attendance domain events.

use serde::{Deserialize, Serialize};

use crate::types::{EventId, UserId};

/// A user joined or left an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttendanceEvent {
    /// A user joined an event.
    Joined {
        /// The event ID.
        event_id: EventId,
        /// The attending user.
        user_id: UserId,
        /// Attendee count after the join.
        attendee_count: i64,
    },
    /// A user left an event.
    Left {
        /// The event ID.
        event_id: EventId,
        /// The user who left.
        user_id: UserId,
    },
}

impl AttendanceEvent {
    /// Short dotted name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Joined { .. } => "attendee.joined",
            Self::Left { .. } => "attendee.left",
        }
    }
}
