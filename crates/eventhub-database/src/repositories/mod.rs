//! Repository implementations for all EventHub entities.

pub mod attendee;
pub mod event;
pub mod locked_event;
pub mod session;
pub mod user;

pub use attendee::AttendeeRepository;
pub use event::EventRepository;
pub use locked_event::LockedEvent;
pub use session::SessionRepository;
pub use user::UserRepository;

/// Columns selected for [`eventhub_entity::event::EventWithStats`] rows.
///
/// Callers append `FROM events e JOIN users u ON u.id = e.created_by` and
/// their own filters.
pub(crate) const EVENT_WITH_STATS_COLUMNS: &str = "e.*, u.name AS creator_name, \
     u.email AS creator_email, \
     (SELECT COUNT(*) FROM attendees c WHERE c.event_id = e.id) AS attendee_count";
