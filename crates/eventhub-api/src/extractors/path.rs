//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use eventhub_core::error::AppError;
use eventhub_core::types::EventId;

use crate::error::ApiError;

/// The event id from a `/{id}` or `/{eventId}` segment.
///
/// A segment that is not a valid id cannot name an existing event, so it
/// is reported as a missing event.
#[derive(Debug, Clone, Copy)]
pub struct EventPath(pub EventId);

/// Parses an event id from a path segment.
pub fn parse_event_id(s: &str) -> Result<EventId, AppError> {
    s.parse()
        .map_err(|_| AppError::not_found("Event not found"))
}

impl<S> FromRequestParts<S> for EventPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        Ok(EventPath(parse_event_id(&raw)?))
    }
}
