//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use eventhub_core::types::{EventSortField, PageRequest, SortDirection};
use eventhub_core::types::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE};
use eventhub_entity::event::UpdateEvent;
use eventhub_service::auth::Registration;
use eventhub_service::event::NewEvent;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(
        min = 8,
        max = 100,
        message = "Password must be between 8 and 100 characters"
    ))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Event creation request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Title.
    #[validate(length(
        min = 3,
        max = 200,
        message = "Title must be between 3 and 200 characters"
    ))]
    pub title: String,
    /// Description.
    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: Option<String>,
    /// RFC 3339 date.
    pub date: DateTime<Utc>,
    /// Location.
    #[validate(length(max = 300, message = "Location is too long"))]
    pub location: Option<String>,
    /// Attendance limit.
    #[validate(range(min = 1, message = "maxAttendees must be a positive integer"))]
    pub max_attendees: Option<i32>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            date: req.date,
            location: req.location,
            max_attendees: req.max_attendees,
        }
    }
}

/// Event update request body. Absent fields are left unchanged; `null`
/// clears the optional ones.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    /// Title.
    #[validate(length(
        min = 3,
        max = 200,
        message = "Title must be between 3 and 200 characters"
    ))]
    pub title: Option<String>,
    /// Description.
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: Option<Option<String>>,
    /// RFC 3339 date.
    pub date: Option<DateTime<Utc>>,
    /// Location.
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 300, message = "Location is too long"))]
    pub location: Option<Option<String>>,
    /// Attendance limit.
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 1, message = "maxAttendees must be a positive integer"))]
    pub max_attendees: Option<Option<i32>>,
}

impl From<UpdateEventRequest> for UpdateEvent {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            date: req.date,
            location: req.location,
            max_attendees: req.max_attendees,
        }
    }
}

/// Query string of the event listing.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListEventsQuery {
    /// Page number (1-based).
    #[validate(custom(function = "validate_page"))]
    pub page: Option<u64>,
    /// Page size, clamped to the allowed range.
    pub limit: Option<u64>,
    /// Sort field.
    pub sort: Option<EventSortField>,
    /// Sort direction.
    pub order: Option<SortDirection>,
}

fn validate_page(page: u64) -> Result<(), ValidationError> {
    match page {
        0 => Err(ValidationError::new("range").with_message("page must be at least 1".into())),
        p if p > MAX_PAGE => {
            Err(ValidationError::new("range").with_message("page is too large".into()))
        }
        _ => Ok(()),
    }
}

impl ListEventsQuery {
    /// The page to fetch.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}
