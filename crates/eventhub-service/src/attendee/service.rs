//! Attendance service.

use std::sync::Arc;

use tracing::info;

use eventhub_core::error::AppError;
use eventhub_core::events::{AttendanceEvent, DomainEvent, EventBus};
use eventhub_core::types::EventId;
use eventhub_database::repositories::{AttendeeRepository, EventRepository};
use eventhub_entity::attendee::AttendeeWithUser;
use eventhub_entity::event::EventWithStats;

use crate::context::RequestContext;
use crate::event::rules::JoinSnapshot;

/// Handles joining and leaving events.
#[derive(Debug, Clone)]
pub struct AttendeeService {
    /// Event repository (owns the row lock used for joins).
    event_repo: Arc<EventRepository>,
    /// Attendee repository.
    attendee_repo: Arc<AttendeeRepository>,
    /// Domain event bus.
    bus: EventBus,
}

impl AttendeeService {
    /// Creates a new attendee service.
    pub fn new(
        event_repo: Arc<EventRepository>,
        attendee_repo: Arc<AttendeeRepository>,
        bus: EventBus,
    ) -> Self {
        Self {
            event_repo,
            attendee_repo,
            bus,
        }
    }

    /// Joins the current user to an event.
    ///
    /// The event row stays locked from the duplicate and capacity checks
    /// through the insert, so concurrent joins cannot overfill the event.
    pub async fn join(&self, ctx: &RequestContext, event_id: EventId) -> Result<AttendeeWithUser, AppError> {
        let mut locked = self
            .event_repo
            .lock(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        let snapshot = JoinSnapshot {
            owner: locked.event().created_by,
            max_attendees: locked.event().max_attendees,
            attendee_count: locked.attendee_count().await?,
            already_attending: locked.is_attending(ctx.user_id).await?,
        };
        snapshot.check(ctx.user_id)?;

        let attendee = locked.insert_attendee(ctx.user_id).await?;
        locked.commit().await?;

        let attendee_count = snapshot.attendee_count + 1;
        info!(user_id = %ctx.user_id, event_id = %event_id, attendee_count, "Joined event");
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            AttendanceEvent::Joined {
                event_id,
                user_id: ctx.user_id,
                attendee_count,
            }
            .into(),
        ));

        Ok(AttendeeWithUser {
            attendee,
            user_name: ctx.name.clone(),
            user_email: ctx.email.clone(),
        })
    }

    /// Removes the current user from an event.
    pub async fn leave(&self, ctx: &RequestContext, event_id: EventId) -> Result<(), AppError> {
        if !self.attendee_repo.delete(event_id, ctx.user_id).await? {
            return Err(AppError::validation("Not attending this event"));
        }

        info!(user_id = %ctx.user_id, event_id = %event_id, "Left event");
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            AttendanceEvent::Left {
                event_id,
                user_id: ctx.user_id,
            }
            .into(),
        ));
        Ok(())
    }

    /// Lists the attendees of an event.
    pub async fn list(&self, event_id: EventId) -> Result<Vec<AttendeeWithUser>, AppError> {
        if self.event_repo.find_by_id(event_id).await?.is_none() {
            return Err(AppError::not_found("Event not found"));
        }
        self.attendee_repo.find_by_event(event_id).await
    }

    /// Lists the events the current user has joined.
    pub async fn joined_events(&self, ctx: &RequestContext) -> Result<Vec<EventWithStats>, AppError> {
        self.attendee_repo.find_joined_events(ctx.user_id).await
    }
}
