//! Event repository implementation.

use sqlx::PgPool;

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::{EventId, EventSortField, PageRequest, SortDirection, UserId};
use eventhub_entity::event::{CreateEvent, Event, EventWithStats};

use super::EVENT_WITH_STATS_COLUMNS;
use super::locked_event::LockedEvent;

/// Repository for event persistence and listing.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event row by ID.
    pub async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// Find an event with its creator and attendee count.
    pub async fn find_with_stats(&self, id: EventId) -> AppResult<Option<EventWithStats>> {
        let sql = format!(
            "SELECT {EVENT_WITH_STATS_COLUMNS} FROM events e \
             JOIN users u ON u.id = e.created_by \
             WHERE e.id = $1"
        );
        sqlx::query_as::<_, EventWithStats>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// List one page of events in the requested order, with the total count.
    pub async fn list(
        &self,
        page: &PageRequest,
        sort: EventSortField,
        direction: SortDirection,
    ) -> AppResult<(Vec<EventWithStats>, u64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))?;

        // Sort column and direction come from closed enums, never from input.
        let sql = format!(
            "SELECT {EVENT_WITH_STATS_COLUMNS} FROM events e \
             JOIN users u ON u.id = e.created_by \
             ORDER BY {} {}, e.id \
             LIMIT $1 OFFSET $2",
            sort.column(),
            direction.as_sql(),
        );
        let events = sqlx::query_as::<_, EventWithStats>(&sql)
            .bind(page.limit as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))?;

        Ok((events, total as u64))
    }

    /// List the events a user created, newest first.
    pub async fn find_by_creator(&self, user_id: UserId) -> AppResult<Vec<EventWithStats>> {
        let sql = format!(
            "SELECT {EVENT_WITH_STATS_COLUMNS} FROM events e \
             JOIN users u ON u.id = e.created_by \
             WHERE e.created_by = $1 \
             ORDER BY e.created_at DESC, e.id"
        );
        sqlx::query_as::<_, EventWithStats>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list created events", e)
            })
    }

    /// Insert a new event.
    pub async fn create(&self, data: &CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, date, location, max_attendees, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(EventId::new())
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.date)
        .bind(&data.location)
        .bind(data.max_attendees)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    /// Open a transaction holding a row lock on the event.
    ///
    /// Returns `None` when the event does not exist. Concurrent callers
    /// locking the same event wait until the holder commits or drops the
    /// guard.
    pub async fn lock(&self, id: EventId) -> AppResult<Option<LockedEvent>> {
        LockedEvent::acquire(&self.pool, id).await
    }

    /// Set or clear the banner URL. Returns the updated row, or `None` if
    /// the event no longer exists.
    pub async fn set_banner(
        &self,
        id: EventId,
        banner_url: Option<&str>,
    ) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET banner_url = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(banner_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update banner", e))
    }

    /// Delete an event. Attendance rows cascade.
    pub async fn delete(&self, id: EventId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }
}
