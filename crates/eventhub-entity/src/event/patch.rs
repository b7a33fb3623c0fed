//! Partial event updates.

use chrono::{DateTime, Utc};

/// A partial update to an event. `None` leaves the field unchanged.
///
/// Optional columns use a nested `Option` so that `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    /// New title.
    pub title: Option<String>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New date.
    pub date: Option<DateTime<Utc>>,
    /// New location, or `Some(None)` to clear it.
    pub location: Option<Option<String>>,
    /// New attendance limit, or `Some(None)` to remove the limit.
    pub max_attendees: Option<Option<i32>>,
}

impl UpdateEvent {
    /// Names of the fields this patch sets.
    pub fn changed_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title".to_string());
        }
        if self.description.is_some() {
            fields.push("description".to_string());
        }
        if self.date.is_some() {
            fields.push("date".to_string());
        }
        if self.location.is_some() {
            fields.push("location".to_string());
        }
        if self.max_attendees.is_some() {
            fields.push("max_attendees".to_string());
        }
        fields
    }
}
