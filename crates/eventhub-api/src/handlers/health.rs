//! Health check handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use eventhub_database::connection::ping;

use crate::dto::response::{ApiResponse, HealthResponse, ServiceInfo};
use crate::state::AppState;

/// GET /
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "EventHub API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        timestamp: Utc::now(),
        environment: state.config.server.environment.clone(),
    })
}

fn label(up: bool, ok: &str, down: &str) -> String {
    let text = if up { ok } else { down };
    text.to_string()
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = matches!(ping(&state.db_pool).await, Ok(true));
    let storage = state.storage.health_check().await;

    Json(ApiResponse::ok(HealthResponse {
        status: label(database && storage, "ok", "degraded"),
        database: label(database, "connected", "unreachable"),
        storage: label(storage, "available", "unavailable"),
    }))
}
