//! Row-locked event transaction.

use sqlx::{PgPool, Postgres, Transaction};

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::{AttendeeId, EventId, UserId};
use eventhub_entity::attendee::Attendee;
use eventhub_entity::event::{Event, UpdateEvent};

/// An open transaction holding `SELECT ... FOR UPDATE` on one event row.
///
/// Joins and capacity-changing edits read the attendee count and write
/// through this guard, so the count cannot change between check and write.
/// Dropping the guard without [`LockedEvent::commit`] rolls back.
pub struct LockedEvent {
    tx: Transaction<'static, Postgres>,
    event: Event,
}

impl std::fmt::Debug for LockedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockedEvent")
            .field("event_id", &self.event.id)
            .finish_non_exhaustive()
    }
}

impl LockedEvent {
    pub(crate) async fn acquire(pool: &PgPool, id: EventId) -> AppResult<Option<Self>> {
        let mut tx = pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock event", e))?;

        Ok(event.map(|event| Self { tx, event }))
    }

    /// The locked event as read under the lock.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Count attendance rows of the locked event.
    pub async fn attendee_count(&mut self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendees WHERE event_id = $1")
            .bind(self.event.id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count attendees", e))
    }

    /// Whether `user_id` already attends the locked event.
    pub async fn is_attending(&mut self, user_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM attendees WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(self.event.id)
        .bind(user_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check attendance", e))
    }

    /// Insert an attendance row for `user_id`.
    pub async fn insert_attendee(&mut self, user_id: UserId) -> AppResult<Attendee> {
        sqlx::query_as::<_, Attendee>(
            "INSERT INTO attendees (id, user_id, event_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(AttendeeId::new())
        .bind(user_id)
        .bind(self.event.id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("attendees_user_id_event_id_key") =>
            {
                AppError::conflict("Already joined this event")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to join event", e),
        })
    }

    /// Apply a partial update and bump `updated_at`.
    pub async fn update(&mut self, patch: &UpdateEvent) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            "UPDATE events SET \
                title = COALESCE($2, title), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                date = COALESCE($5, date), \
                location = CASE WHEN $6 THEN $7 ELSE location END, \
                max_attendees = CASE WHEN $8 THEN $9 ELSE max_attendees END, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(self.event.id)
        .bind(&patch.title)
        .bind(patch.description.is_some())
        .bind(patch.description.clone().flatten())
        .bind(patch.date)
        .bind(patch.location.is_some())
        .bind(patch.location.clone().flatten())
        .bind(patch.max_attendees.is_some())
        .bind(patch.max_attendees.flatten())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))?;

        self.event = event.clone();
        Ok(event)
    }

    /// Commit the transaction and release the lock.
    pub async fn commit(self) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}
