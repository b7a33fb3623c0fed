//! Event handlers: listing, detail, create, update, delete.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{CreateEventRequest, ListEventsQuery, UpdateEventRequest};
use crate::dto::response::{ApiResponse, EventData, EventListData, EventView, EventsData};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, EventPath, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListEventsQuery>,
) -> ApiResult<Json<ApiResponse<EventListData>>> {
    let page = state
        .event_service
        .list(
            query.page_request(),
            query.sort.unwrap_or_default(),
            query.order.unwrap_or_default(),
        )
        .await?;

    Ok(Json(ApiResponse::ok(EventListData {
        events: page.items.into_iter().map(EventView::from).collect(),
        pagination: page.meta,
    })))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    EventPath(id): EventPath,
) -> ApiResult<Json<ApiResponse<EventData<EventView>>>> {
    let event = state.event_service.get(id).await?;
    Ok(Json(ApiResponse::ok(EventData {
        event: event.into(),
    })))
}

/// GET /api/events/user/created
pub async fn list_created(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<EventsData>>> {
    let events = state.event_service.list_created(&auth).await?;
    Ok(Json(ApiResponse::ok(events.into())))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<EventData<EventView>>>)> {
    let event = state.event_service.create(&auth, req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            EventData {
                event: event.into(),
            },
            "Event created successfully",
        )),
    ))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(id): EventPath,
    ValidatedJson(req): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<ApiResponse<EventData<EventView>>>> {
    let event = state.event_service.update(&auth, id, req.into()).await?;

    Ok(Json(ApiResponse::with_message(
        EventData {
            event: event.into(),
        },
        "Event updated successfully",
    )))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(id): EventPath,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.event_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::with_message((), "Event deleted successfully")))
}
