//! Domain rules for events and attendance.
//!
//! Everything here is a pure function over values already loaded by the
//! caller, so the decisions can be tested without a database.

use chrono::{DateTime, Utc};

use eventhub_core::error::AppError;
use eventhub_core::types::UserId;
use eventhub_entity::event::Event;

/// An owner-only operation, used to word the refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerAction {
    /// Editing event fields.
    Update,
    /// Deleting the event.
    Delete,
    /// Uploading a banner.
    UploadBanner,
    /// Removing the banner.
    DeleteBanner,
}

impl OwnerAction {
    fn phrase(self) -> &'static str {
        match self {
            Self::Update => "update this event",
            Self::Delete => "delete this event",
            Self::UploadBanner => "upload banner for this event",
            Self::DeleteBanner => "delete banner for this event",
        }
    }
}

/// Refuse `action` unless `user_id` created the event.
pub fn ensure_owner(event: &Event, user_id: UserId, action: OwnerAction) -> Result<(), AppError> {
    if event.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "You are not authorized to {}",
            action.phrase()
        )))
    }
}

/// Event dates must lie strictly after `now`.
pub fn ensure_future_date(date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), AppError> {
    if date > now {
        Ok(())
    } else {
        Err(AppError::validation("Event date must be in the future"))
    }
}

/// A lowered limit may not drop below the attendees already registered.
pub fn ensure_capacity_fits(max_attendees: Option<i32>, attendee_count: i64) -> Result<(), AppError> {
    match max_attendees {
        Some(max) if i64::from(max) < attendee_count => Err(AppError::capacity(format!(
            "Max attendees cannot be lower than the current attendee count ({attendee_count})"
        ))),
        _ => Ok(()),
    }
}

/// State of an event, read under its row lock, that decides a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinSnapshot {
    /// The event owner.
    pub owner: UserId,
    /// Attendance limit, if any.
    pub max_attendees: Option<i32>,
    /// Current number of attendees.
    pub attendee_count: i64,
    /// Whether the joining user already attends.
    pub already_attending: bool,
}

impl JoinSnapshot {
    /// Decide whether `user_id` may join.
    ///
    /// The owner is refused first, then a duplicate join, then a full event;
    /// a duplicate is reported as such even when the event is also full.
    pub fn check(&self, user_id: UserId) -> Result<(), AppError> {
        if self.owner == user_id {
            return Err(AppError::validation(
                "Event creator cannot join their own event",
            ));
        }
        if self.already_attending {
            return Err(AppError::conflict("Already joined this event"));
        }
        if let Some(max) = self.max_attendees {
            if self.attendee_count >= i64::from(max) {
                return Err(AppError::capacity("Event is full"));
            }
        }
        Ok(())
    }
}
