//! Session cookie resolution.
//!
//! Runs on every request. A valid cookie attaches a [`RequestContext`] to
//! the request; an invalid one attaches [`InvalidSession`] and the response
//! clears the cookie. Renewed sessions get their cookie re-issued.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use eventhub_auth::ValidatedSession;
use eventhub_core::config::SessionConfig;
use eventhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::extractors::client::client_ip;
use crate::state::AppState;

/// Marker for a request that presented an unknown or expired session cookie.
#[derive(Debug, Clone, Copy)]
pub struct InvalidSession;

/// Builds the session cookie for `token`.
pub fn session_cookie(
    config: &SessionConfig,
    token: String,
    ttl: chrono::Duration,
) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.secure_cookie)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

/// Builds an empty, already expired session cookie.
pub fn blank_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.secure_cookie)
        .max_age(time::Duration::ZERO)
        .build()
}

fn context_for(request: &Request, validated: &ValidatedSession) -> RequestContext {
    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    RequestContext::new(
        validated.user.id,
        validated.session.id.clone(),
        validated.user.email.clone(),
        validated.user.name.clone(),
        client_ip(request.headers(), request.extensions()).unwrap_or_else(|| "unknown".to_string()),
        user_agent,
    )
}

/// Whether the handler already set the session cookie itself.
fn sets_cookie(response: &Response, name: &str) -> bool {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix))
}

/// Resolves the session cookie and attaches the result to the request.
pub async fn resolve_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let config = &state.config.session;
    let Some(token) = jar
        .get(&config.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
    else {
        return next.run(request).await;
    };

    let reissue = match state.session_manager.validate(&token).await {
        Ok(Some(validated)) => {
            let ctx = context_for(&request, &validated);
            request.extensions_mut().insert(ctx);
            validated
                .fresh
                .then(|| session_cookie(config, token, state.session_manager.ttl()))
        }
        Ok(None) => {
            debug!("Rejected unknown or expired session cookie");
            request.extensions_mut().insert(InvalidSession);
            Some(blank_cookie(config))
        }
        Err(e) => return ApiError(e).into_response(),
    };

    let response = next.run(request).await;

    match reissue {
        Some(cookie) if !sets_cookie(&response, &config.cookie_name) => {
            (jar.add(cookie), response).into_response()
        }
        _ => response,
    }
}
