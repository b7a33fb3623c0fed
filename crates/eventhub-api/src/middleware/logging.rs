//! Access log for every request.

use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// How a finished request is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    Rejected,
    Failed,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Failed
        } else if status.is_client_error() {
            Self::Rejected
        } else {
            Self::Ok
        }
    }
}

/// Logs method, path (without query), status and latency of each request.
/// Client errors are logged at debug level since they are expected traffic.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    match Outcome::of(response.status()) {
        Outcome::Failed => warn!(%method, %path, status, latency_ms, "Request failed"),
        Outcome::Rejected => debug!(%method, %path, status, latency_ms, "Request rejected"),
        Outcome::Ok => info!(%method, %path, status, latency_ms, "Request served"),
    }

    response
}
