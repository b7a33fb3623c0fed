//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use eventhub_core::error::{AppError, ErrorKind};

/// Message returned in place of server-side failure details.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error type returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// The error itself.
    pub error: ApiErrorBody,
}

/// Body of an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, repeated for clients that only read the body.
    pub status: u16,
    /// Requested path, set for unknown routes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::Capacity => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn envelope(status: StatusCode, message: String, path: Option<String>) -> Response {
    let body = ApiErrorResponse {
        error: ApiErrorBody {
            message,
            status: status.as_u16(),
            path,
        },
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let AppError {
            kind,
            message,
            source,
        } = self.0;
        let status = status_for(kind);

        let message = if kind.is_server_error() {
            tracing::error!(
                kind = %kind,
                error = %message,
                source = ?source,
                "Internal server error"
            );
            INTERNAL_MESSAGE.to_string()
        } else {
            message
        };

        envelope(status, message, None)
    }
}

/// Fallback for unmatched routes.
pub async fn route_not_found(uri: Uri) -> Response {
    envelope(
        StatusCode::NOT_FOUND,
        "Route not found".to_string(),
        Some(uri.path().to_string()),
    )
}
