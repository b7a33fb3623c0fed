//! Event listing domain events.

use serde::{Deserialize, Serialize};

use crate::types::EventId;

/// Changes to the set of published events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogEvent {
    /// An event was created.
    Created {
        /// The event ID.
        event_id: EventId,
        /// The event title.
        title: String,
    },
    /// An event was edited by its creator.
    Updated {
        /// The event ID.
        event_id: EventId,
        /// Fields that changed.
        changed_fields: Vec<String>,
    },
    /// An event was deleted, together with its attendance records.
    Deleted {
        /// The event ID.
        event_id: EventId,
        /// The title (for display after deletion).
        title: String,
    },
    /// A banner image was attached or replaced.
    BannerUpdated {
        /// The event ID.
        event_id: EventId,
        /// Public URL of the new banner.
        banner_url: String,
    },
    /// The banner image was removed.
    BannerRemoved {
        /// The event ID.
        event_id: EventId,
    },
}

impl CatalogEvent {
    /// Short dotted name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "event.created",
            Self::Updated { .. } => "event.updated",
            Self::Deleted { .. } => "event.deleted",
            Self::BannerUpdated { .. } => "event.banner_updated",
            Self::BannerRemoved { .. } => "event.banner_removed",
        }
    }
}
