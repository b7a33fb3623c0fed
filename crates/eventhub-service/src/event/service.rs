//! Event CRUD service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use eventhub_core::error::AppError;
use eventhub_core::events::{CatalogEvent, DomainEvent, EventBus};
use eventhub_core::types::{EventId, EventSortField, Page, PageRequest, SortDirection};
use eventhub_database::repositories::EventRepository;
use eventhub_entity::event::{CreateEvent, EventWithStats, UpdateEvent};
use eventhub_storage::StorageManager;

use super::rules::{self, OwnerAction};
use crate::context::RequestContext;

/// Fields supplied when creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Date; must lie in the future.
    pub date: DateTime<Utc>,
    /// Location.
    pub location: Option<String>,
    /// Attendance limit.
    pub max_attendees: Option<i32>,
}

/// Handles event listing, creation, editing and deletion.
#[derive(Debug, Clone)]
pub struct EventService {
    /// Event repository.
    event_repo: Arc<EventRepository>,
    /// Media storage, for removing banners of deleted events.
    storage: Arc<StorageManager>,
    /// Domain event bus.
    bus: EventBus,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(event_repo: Arc<EventRepository>, storage: Arc<StorageManager>, bus: EventBus) -> Self {
        Self {
            event_repo,
            storage,
            bus,
        }
    }

    /// Lists one page of events.
    pub async fn list(
        &self,
        page: PageRequest,
        sort: EventSortField,
        direction: SortDirection,
    ) -> Result<Page<EventWithStats>, AppError> {
        let (events, total) = self.event_repo.list(&page, sort, direction).await?;
        Ok(Page::new(events, &page, total))
    }

    /// Gets one event.
    pub async fn get(&self, id: EventId) -> Result<EventWithStats, AppError> {
        self.event_repo
            .find_with_stats(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// Lists the events the current user created.
    pub async fn list_created(&self, ctx: &RequestContext) -> Result<Vec<EventWithStats>, AppError> {
        self.event_repo.find_by_creator(ctx.user_id).await
    }

    /// Creates an event owned by the current user.
    pub async fn create(&self, ctx: &RequestContext, input: NewEvent) -> Result<EventWithStats, AppError> {
        rules::ensure_future_date(input.date, Utc::now())?;

        let event = self
            .event_repo
            .create(&CreateEvent {
                title: input.title,
                description: input.description,
                date: input.date,
                location: input.location,
                max_attendees: input.max_attendees,
                created_by: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, event_id = %event.id, title = %event.title, "Event created");
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            CatalogEvent::Created {
                event_id: event.id,
                title: event.title.clone(),
            }
            .into(),
        ));

        self.get(event.id).await
    }

    /// Applies a partial update. Only the owner may edit.
    ///
    /// Runs under the event row lock so a lowered attendance limit is
    /// checked against a count no concurrent join can change.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: EventId,
        patch: UpdateEvent,
    ) -> Result<EventWithStats, AppError> {
        let mut locked = self
            .event_repo
            .lock(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        rules::ensure_owner(locked.event(), ctx.user_id, OwnerAction::Update)?;
        if let Some(date) = patch.date {
            rules::ensure_future_date(date, Utc::now())?;
        }
        if let Some(max_attendees) = patch.max_attendees {
            let count = locked.attendee_count().await?;
            rules::ensure_capacity_fits(max_attendees, count)?;
        }

        // An empty patch still bumps `updated_at`.
        let changed_fields = patch.changed_fields();
        locked.update(&patch).await?;
        locked.commit().await?;

        info!(user_id = %ctx.user_id, event_id = %id, fields = ?changed_fields, "Event updated");
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            CatalogEvent::Updated {
                event_id: id,
                changed_fields,
            }
            .into(),
        ));

        self.get(id).await
    }

    /// Deletes an event and, best-effort, its banner. Only the owner may
    /// delete; attendance rows go with the event.
    pub async fn delete(&self, ctx: &RequestContext, id: EventId) -> Result<(), AppError> {
        let event = self
            .event_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        rules::ensure_owner(&event, ctx.user_id, OwnerAction::Delete)?;

        if !self.event_repo.delete(id).await? {
            return Err(AppError::not_found("Event not found"));
        }

        if let Some(url) = &event.banner_url {
            if let Err(e) = self.storage.remove_url(url).await {
                warn!(event_id = %id, banner_url = %url, error = %e, "Failed to remove banner of deleted event");
            }
        }

        info!(user_id = %ctx.user_id, event_id = %id, "Event deleted");
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            CatalogEvent::Deleted {
                event_id: id,
                title: event.title,
            }
            .into(),
        ));

        Ok(())
    }
}
