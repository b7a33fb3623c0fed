//! Attendance handlers: join, leave, list.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, AttendeeData, AttendeeView, AttendeesData, EventsData};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, EventPath};
use crate::state::AppState;

/// POST /api/attendees/{eventId}/join
pub async fn join_event(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<(StatusCode, Json<ApiResponse<AttendeeData>>)> {
    let attendee = state.attendee_service.join(&auth, event_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            AttendeeData {
                attendee: attendee.into(),
            },
            "Successfully joined event",
        )),
    ))
}

/// DELETE /api/attendees/{eventId}/leave
pub async fn leave_event(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.attendee_service.leave(&auth, event_id).await?;
    Ok(Json(ApiResponse::with_message((), "Successfully left event")))
}

/// GET /api/attendees/{eventId}
pub async fn list_attendees(
    State(state): State<AppState>,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<ApiResponse<AttendeesData>>> {
    let attendees = state.attendee_service.list(event_id).await?;

    Ok(Json(ApiResponse::ok(AttendeesData {
        attendees: attendees.into_iter().map(AttendeeView::from).collect(),
    })))
}

/// GET /api/attendees/user/joined
pub async fn joined_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<EventsData>>> {
    let events = state.attendee_service.joined_events(&auth).await?;
    Ok(Json(ApiResponse::ok(events.into())))
}
