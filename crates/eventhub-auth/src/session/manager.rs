//! Session lifecycle manager: create, validate, invalidate.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use eventhub_core::config::{MAX_SESSION_TTL_DAYS, SessionConfig};
use eventhub_core::error::AppError;
use eventhub_core::types::UserId;
use eventhub_database::repositories::{SessionRepository, UserRepository};
use eventhub_entity::session::Session;
use eventhub_entity::user::User;

use super::token::{generate_token, hash_token};

/// A freshly created session together with the token for the cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Token to hand to the client. Not recoverable later.
    pub token: String,
    /// The stored session.
    pub session: Session,
}

/// Outcome of validating a cookie token.
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    /// The session, with its expiry already extended when `fresh`.
    pub session: Session,
    /// The session's user.
    pub user: User,
    /// Whether the expiry was extended and the cookie should be re-issued.
    pub fresh: bool,
}

/// Manages the session lifecycle over the session table.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<SessionRepository>,
    users: Arc<UserRepository>,
    ttl: Duration,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        sessions: Arc<SessionRepository>,
        users: Arc<UserRepository>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            sessions,
            users,
            ttl: session_ttl(config),
        }
    }

    /// Session lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session for a user.
    pub async fn create(&self, user_id: UserId) -> Result<IssuedSession, AppError> {
        let token = generate_token();
        let expires_at = Utc::now() + self.ttl;
        let session = self
            .sessions
            .create(&hash_token(&token), user_id, expires_at)
            .await?;

        debug!(user_id = %user_id, expires_at = %expires_at, "Session created");
        Ok(IssuedSession { token, session })
    }

    /// Resolve a cookie token.
    ///
    /// Returns `Ok(None)` for unknown, expired or orphaned sessions; expired
    /// rows are deleted on the way. Sessions with less than half their
    /// lifetime left are extended to a full lifetime and marked fresh.
    pub async fn validate(&self, token: &str) -> Result<Option<ValidatedSession>, AppError> {
        let session_id = hash_token(token);
        let Some(mut session) = self.sessions.find_by_id(&session_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if session.is_expired_at(now) {
            self.sessions.delete(&session.id).await?;
            debug!(user_id = %session.user_id, "Expired session removed");
            return Ok(None);
        }

        let Some(user) = self.users.find_by_id(session.user_id).await? else {
            self.sessions.delete(&session.id).await?;
            return Ok(None);
        };

        let fresh = needs_renewal(session.expires_at, now, self.ttl);
        if fresh {
            session.expires_at = now + self.ttl;
            self.sessions
                .update_expiry(&session.id, session.expires_at)
                .await?;
            debug!(user_id = %user.id, expires_at = %session.expires_at, "Session renewed");
        }

        Ok(Some(ValidatedSession {
            session,
            user,
            fresh,
        }))
    }

    /// End one session.
    pub async fn invalidate(&self, session_id: &str) -> Result<(), AppError> {
        self.sessions.delete(session_id).await?;
        Ok(())
    }

    /// End every session of a user.
    pub async fn invalidate_all_for_user(&self, user_id: UserId) -> Result<u64, AppError> {
        let count = self.sessions.delete_by_user(user_id).await?;
        info!(user_id = %user_id, count, "All user sessions invalidated");
        Ok(count)
    }

    /// Delete expired sessions. Returns how many were removed.
    pub async fn cleanup_expired(&self) -> Result<u64, AppError> {
        let count = self.sessions.delete_expired().await?;
        if count > 0 {
            info!(count, "Expired sessions cleaned up");
        }
        Ok(count)
    }
}

/// Session lifetime from config, capped at `MAX_SESSION_TTL_DAYS`.
fn session_ttl(config: &SessionConfig) -> Duration {
    let days = config.ttl_days.clamp(1, MAX_SESSION_TTL_DAYS);
    Duration::days(days as i64)
}

/// Whether a session expiring at `expires_at` has less than half of `ttl` left.
pub fn needs_renewal(expires_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    expires_at - now < ttl / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_renewal_threshold() {
        let now = Utc::now();
        let ttl = Duration::days(30);

        assert!(!needs_renewal(now + Duration::days(30), now, ttl));
        assert!(!needs_renewal(now + Duration::days(15), now, ttl));
        assert!(needs_renewal(
            now + Duration::days(15) - Duration::seconds(1),
            now,
            ttl
        ));
        assert!(needs_renewal(now + Duration::hours(1), now, ttl));
    }

    #[test]
    fn test_session_ttl_is_capped() {
        let config = |ttl_days| SessionConfig {
            ttl_days,
            ..Default::default()
        };
        assert_eq!(session_ttl(&config(30)), Duration::days(30));
        assert_eq!(
            session_ttl(&config(u64::MAX)),
            Duration::days(MAX_SESSION_TTL_DAYS as i64)
        );
        assert_eq!(session_ttl(&config(0)), Duration::days(1));
    }
}
