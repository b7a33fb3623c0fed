//! Route definitions for the EventHub HTTP API.
//!
//! Resource routes are mounted under `/api`; the service banner and media
//! objects live at the root. The router receives `AppState` and passes it
//! to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::error::route_not_found;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart framing on top of the banner itself, so that a file
/// just over the limit still reaches the size check with a clear message.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_banner_bytes as usize + MULTIPART_OVERHEAD_BYTES;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(event_routes())
        .merge(attendee_routes())
        .merge(upload_routes())
        .route("/health", get(handlers::health::health));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .route("/", get(handlers::health::service_info))
        .route("/media/{*key}", get(handlers::media::get_media))
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::resolve_session,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/logout-all", post(handlers::auth::logout_all))
        .route("/auth/me", get(handlers::auth::me))
}

/// Event catalog
fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::event::list_events).post(handlers::event::create_event),
        )
        .route("/events/user/created", get(handlers::event::list_created))
        .route(
            "/events/{id}",
            get(handlers::event::get_event)
                .put(handlers::event::update_event)
                .delete(handlers::event::delete_event),
        )
}

/// Join, leave and attendee listing
fn attendee_routes() -> Router<AppState> {
    Router::new()
        .route("/attendees/user/joined", get(handlers::attendee::joined_events))
        .route(
            "/attendees/{eventId}",
            get(handlers::attendee::list_attendees),
        )
        .route(
            "/attendees/{eventId}/join",
            post(handlers::attendee::join_event),
        )
        .route(
            "/attendees/{eventId}/leave",
            delete(handlers::attendee::leave_event),
        )
}

/// Banner media
fn upload_routes() -> Router<AppState> {
    Router::new().route(
        "/upload/{eventId}/banner",
        post(handlers::upload::upload_banner).delete(handlers::upload::delete_banner),
    )
}
