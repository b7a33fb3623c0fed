//! Domain events emitted by EventHub operations.
//!
//! Services publish events through the [`EventBus`]; anything interested in
//! what happens (the activity logger in the server binary, tests, future
//! notification sinks) subscribes and later unsubscribes.

pub mod account;
pub mod attendance;
pub mod bus;
pub mod catalog;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

pub use account::AccountEvent;
pub use attendance::AttendanceEvent;
pub use bus::{EventBus, Subscription};
pub use catalog::CatalogEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event.
    pub actor_id: Option<UserId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// Event listing changes.
    Catalog(CatalogEvent),
    /// Join/leave activity.
    Attendance(AttendanceEvent),
    /// Registration and session activity.
    Account(AccountEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<UserId>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Short dotted name of the event, used as a log field.
    pub fn name(&self) -> &'static str {
        match &self.payload {
            EventPayload::Catalog(e) => e.name(),
            EventPayload::Attendance(e) => e.name(),
            EventPayload::Account(e) => e.name(),
        }
    }
}

impl From<CatalogEvent> for EventPayload {
    fn from(event: CatalogEvent) -> Self {
        Self::Catalog(event)
    }
}

impl From<AttendanceEvent> for EventPayload {
    fn from(event: AttendanceEvent) -> Self {
        Self::Attendance(event)
    }
}

impl From<AccountEvent> for EventPayload {
    fn from(event: AccountEvent) -> Self {
        Self::Account(event)
    }
}
