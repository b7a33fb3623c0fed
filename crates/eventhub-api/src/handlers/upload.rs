//! Banner upload handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::debug;

use eventhub_core::error::AppError;
use eventhub_service::banner::BannerFile;

use crate::dto::response::{ApiResponse, BannerData, EventData, EventRecordView};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, EventPath};
use crate::state::AppState;

/// Name of the multipart field carrying the image.
pub const BANNER_FIELD: &str = "banner";

fn multipart_error(state: &AppState, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::validation(format!(
            "File size exceeds {}MB limit.",
            state.config.upload.max_banner_bytes / (1024 * 1024)
        ))
    } else {
        AppError::validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// Reads the banner field; other fields are skipped.
async fn read_banner(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<Option<BannerFile>, AppError> {
    let mut banner = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(state, e))?
    {
        if field.name() != Some(BANNER_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await.map_err(|e| multipart_error(state, e))?;

        banner = Some(BannerFile {
            file_name,
            content_type,
            data,
        });
    }

    Ok(banner)
}

/// POST /api/upload/{eventId}/banner
pub async fn upload_banner(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<BannerData>>> {
    let file = read_banner(&state, &mut multipart).await?;
    let (event, banner_url) = state.banner_service.upload(&auth, event_id, file).await?;

    Ok(Json(ApiResponse::with_message(
        BannerData {
            event: event.into(),
            banner_url,
        },
        "Banner uploaded successfully",
    )))
}

/// DELETE /api/upload/{eventId}/banner
pub async fn delete_banner(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<ApiResponse<EventData<EventRecordView>>>> {
    let event = state.banner_service.remove(&auth, event_id).await?;

    Ok(Json(ApiResponse::with_message(
        EventData {
            event: event.into(),
        },
        "Banner deleted successfully",
    )))
}
