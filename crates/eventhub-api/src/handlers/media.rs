//! Serves stored media objects.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use eventhub_service::banner::BannerFormat;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /media/{*key}
pub async fn get_media(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let data = state.storage.get(&key).await?;
    let content_type = BannerFormat::sniff(&data)
        .map(BannerFormat::mime)
        .unwrap_or("application/octet-stream");

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        data,
    )
        .into_response())
}
