//! `AuthUser` extractor: the session resolved by the session middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use eventhub_core::error::AppError;
use eventhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::middleware::session::InvalidSession;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(AuthUser(ctx.clone()));
        }

        let message = if parts.extensions.get::<InvalidSession>().is_some() {
            "Unauthorized - Invalid session"
        } else {
            "Unauthorized - No session found"
        };
        Err(AppError::unauthorized(message).into())
    }
}
