//! Attendee repository implementation.

use sqlx::PgPool;

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::{EventId, UserId};
use eventhub_entity::attendee::AttendeeWithUser;
use eventhub_entity::event::EventWithStats;

use super::EVENT_WITH_STATS_COLUMNS;

/// Repository for attendance reads and removal.
///
/// Joining goes through [`super::LockedEvent`] so the capacity check and
/// the insert share one transaction.
#[derive(Debug, Clone)]
pub struct AttendeeRepository {
    pool: PgPool,
}

impl AttendeeRepository {
    /// Create a new attendee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the attendees of an event in join order.
    pub async fn find_by_event(&self, event_id: EventId) -> AppResult<Vec<AttendeeWithUser>> {
        sqlx::query_as::<_, AttendeeWithUser>(
            "SELECT a.*, u.name AS user_name, u.email AS user_email \
             FROM attendees a \
             JOIN users u ON u.id = a.user_id \
             WHERE a.event_id = $1 \
             ORDER BY a.joined_at ASC, a.id",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attendees", e))
    }

    /// List the events a user has joined, soonest first.
    pub async fn find_joined_events(&self, user_id: UserId) -> AppResult<Vec<EventWithStats>> {
        let sql = format!(
            "SELECT {EVENT_WITH_STATS_COLUMNS} FROM attendees a \
             JOIN events e ON e.id = a.event_id \
             JOIN users u ON u.id = e.created_by \
             WHERE a.user_id = $1 \
             ORDER BY e.date ASC, e.id"
        );
        sqlx::query_as::<_, EventWithStats>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list joined events", e)
            })
    }

    /// Remove a user's attendance. Returns `false` when there was none.
    pub async fn delete(&self, event_id: EventId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM attendees WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to leave event", e))?;
        Ok(result.rows_affected() > 0)
    }
}
