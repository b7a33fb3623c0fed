//! Banner upload and removal.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use eventhub_core::config::UploadConfig;
use eventhub_core::error::AppError;
use eventhub_core::events::{CatalogEvent, DomainEvent, EventBus};
use eventhub_core::types::EventId;
use eventhub_database::repositories::EventRepository;
use eventhub_entity::event::Event;
use eventhub_storage::StorageManager;

use super::format::BannerFormat;
use crate::context::RequestContext;
use crate::event::rules::{self, OwnerAction};

const INVALID_TYPE: &str = "Invalid file type. Only images are allowed.";

/// Checks a file against the upload limits and returns its format.
///
/// The declared type must be allowed and the bytes must actually be an
/// image of that type.
pub fn validate_banner(config: &UploadConfig, file: &BannerFile) -> Result<BannerFormat, AppError> {
    let declared = file
        .content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
        .filter(|ct| {
            config
                .allowed_content_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ct))
        })
        .and_then(BannerFormat::from_mime)
        .ok_or_else(|| AppError::validation(INVALID_TYPE))?;

    if file.data.len() as u64 > config.max_banner_bytes {
        return Err(AppError::validation(format!(
            "File size exceeds {}MB limit.",
            config.max_banner_bytes / (1024 * 1024)
        )));
    }

    match BannerFormat::sniff(&file.data) {
        Some(actual) if actual == declared => Ok(declared),
        _ => Err(AppError::validation(INVALID_TYPE)),
    }
}

/// A banner file received from a multipart form.
#[derive(Debug, Clone)]
pub struct BannerFile {
    /// Original file name, if the client sent one.
    pub file_name: Option<String>,
    /// Declared content type.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

/// Handles banner uploads and removal.
#[derive(Debug, Clone)]
pub struct BannerService {
    /// Event repository.
    event_repo: Arc<EventRepository>,
    /// Media storage.
    storage: Arc<StorageManager>,
    /// Upload limits.
    config: UploadConfig,
    /// Domain event bus.
    bus: EventBus,
}

impl BannerService {
    /// Creates a new banner service.
    pub fn new(
        event_repo: Arc<EventRepository>,
        storage: Arc<StorageManager>,
        config: UploadConfig,
        bus: EventBus,
    ) -> Self {
        Self {
            event_repo,
            storage,
            config,
            bus,
        }
    }

    /// Stores a new banner for an event and returns the updated event with
    /// the banner's public URL.
    ///
    /// The new object is written before the row is updated. If the update
    /// fails the new object is removed again; the previous banner is only
    /// removed once the row points at the new one.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
        file: Option<BannerFile>,
    ) -> Result<(Event, String), AppError> {
        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;
        rules::ensure_owner(&event, ctx.user_id, OwnerAction::UploadBanner)?;

        let file = file
            .filter(|f| !f.data.is_empty())
            .ok_or_else(|| AppError::validation("No file provided"))?;
        let format = validate_banner(&self.config, &file)?;

        let key = StorageManager::banner_key(format.extension());
        let url = self.storage.public_url(&key);
        let size = file.data.len();
        self.storage.put(&key, file.data, format.mime()).await?;

        let updated = match self.event_repo.set_banner(event_id, Some(&url)).await {
            Ok(Some(updated)) => updated,
            outcome => {
                if let Err(e) = self.storage.remove(&key).await {
                    warn!(key = %key, error = %e, "Failed to remove orphaned banner");
                }
                return Err(match outcome {
                    Err(e) => e,
                    _ => AppError::not_found("Event not found"),
                });
            }
        };

        if let Some(old_url) = &event.banner_url {
            if let Err(e) = self.storage.remove_url(old_url).await {
                warn!(event_id = %event_id, banner_url = %old_url, error = %e, "Failed to delete old banner");
            }
        }

        info!(
            user_id = %ctx.user_id,
            event_id = %event_id,
            key = %key,
            size,
            file_name = file.file_name.as_deref().unwrap_or(""),
            "Banner uploaded"
        );
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            CatalogEvent::BannerUpdated {
                event_id,
                banner_url: url.clone(),
            }
            .into(),
        ));

        Ok((updated, url))
    }

    /// Removes an event's banner.
    pub async fn remove(&self, ctx: &RequestContext, event_id: EventId) -> Result<Event, AppError> {
        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;
        rules::ensure_owner(&event, ctx.user_id, OwnerAction::DeleteBanner)?;

        let url = event
            .banner_url
            .as_deref()
            .ok_or_else(|| AppError::validation("No banner to delete"))?;

        if let Some(key) = self.storage.key_from_url(url) {
            self.storage.remove(&key).await?;
        }

        let updated = self
            .event_repo
            .set_banner(event_id, None)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        info!(user_id = %ctx.user_id, event_id = %event_id, "Banner removed");
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            CatalogEvent::BannerRemoved { event_id }.into(),
        ));

        Ok(updated)
    }
}
