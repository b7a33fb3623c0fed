//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use eventhub_core::types::{AttendeeId, EventId, PaginationMeta, UserId};
use eventhub_entity::attendee::AttendeeWithUser;
use eventhub_entity::event::{Event, EventWithStats};
use eventhub_entity::session::Session;
use eventhub_entity::user::{User, UserSummary};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true`.
    pub success: bool,
    /// Optional confirmation message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Creates a successful response carrying a message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// A user as returned to its owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// The session handed out at login. The token itself only travels in the
/// cookie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            expires_at: session.expires_at,
        }
    }
}

/// Register / login payload.
#[derive(Debug, Clone, Serialize)]
pub struct AuthData {
    pub user: UserView,
    pub session: SessionView,
}

/// `{ user }` payload.
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub user: UserView,
}

/// An event row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecordView {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub banner_url: Option<String>,
    pub max_attendees: Option<i32>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventRecordView {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            location: event.location,
            banner_url: event.banner_url,
            max_attendees: event.max_attendees,
            created_by: event.created_by,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// An event with its creator and attendance count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: EventRecordView,
    pub creator: UserSummary,
    pub attendee_count: i64,
}

impl From<EventWithStats> for EventView {
    fn from(stats: EventWithStats) -> Self {
        let creator = stats.creator();
        Self {
            event: stats.event.into(),
            creator,
            attendee_count: stats.attendee_count,
        }
    }
}

/// `{ event }` payload.
#[derive(Debug, Clone, Serialize)]
pub struct EventData<E: Serialize> {
    pub event: E,
}

/// `{ events }` payload.
#[derive(Debug, Clone, Serialize)]
pub struct EventsData {
    pub events: Vec<EventView>,
}

impl From<Vec<EventWithStats>> for EventsData {
    fn from(events: Vec<EventWithStats>) -> Self {
        Self {
            events: events.into_iter().map(EventView::from).collect(),
        }
    }
}

/// Result of ending all of a user's sessions.
#[derive(Debug, Clone, Serialize)]
pub struct TerminatedData {
    pub terminated: u64,
}

/// One page of the event listing.
#[derive(Debug, Clone, Serialize)]
pub struct EventListData {
    pub events: Vec<EventView>,
    pub pagination: PaginationMeta,
}

/// Upload result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerData {
    pub event: EventRecordView,
    pub banner_url: String,
}

/// An attendance record with its user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeView {
    pub id: AttendeeId,
    pub event_id: EventId,
    pub joined_at: DateTime<Utc>,
    pub user: UserSummary,
}

impl From<AttendeeWithUser> for AttendeeView {
    fn from(row: AttendeeWithUser) -> Self {
        let user = row.user();
        Self {
            id: row.attendee.id,
            event_id: row.attendee.event_id,
            joined_at: row.attendee.joined_at,
            user,
        }
    }
}

/// `{ attendee }` payload.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeeData {
    pub attendee: AttendeeView,
}

/// `{ attendees }` payload.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeesData {
    pub attendees: Vec<AttendeeView>,
}

/// Service banner served at `/`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

/// Dependency health.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is reachable, `degraded` otherwise.
    pub status: String,
    pub database: String,
    pub storage: String,
}
