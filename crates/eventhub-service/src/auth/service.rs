//! Authentication service.

use std::sync::Arc;

use tracing::{info, warn};

use eventhub_auth::{IssuedSession, PasswordHasher, SessionManager};
use eventhub_core::error::AppError;
use eventhub_core::events::{AccountEvent, DomainEvent, EventBus};
use eventhub_database::repositories::UserRepository;
use eventhub_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Email address.
    pub email: String,
    /// Plaintext password, already length-checked.
    pub password: String,
    /// Display name.
    pub name: Option<String>,
}

/// A signed-in user and the session issued for them.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The user.
    pub user: User,
    /// The new session and its cookie token.
    pub session: IssuedSession,
}

/// Handles account registration and the session lifecycle around login.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session manager.
    sessions: Arc<SessionManager>,
    /// Domain event bus.
    bus: EventBus,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        sessions: Arc<SessionManager>,
        bus: EventBus,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            sessions,
            bus,
        }
    }

    /// Creates an account and signs it in.
    pub async fn register(&self, input: Registration) -> Result<AuthOutcome, AppError> {
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email: input.email,
                password_hash,
                name: input.name,
            })
            .await?;
        let session = self.sessions.create(user.id).await?;

        info!(user_id = %user.id, email = %user.email, "User registered");
        self.bus.publish(DomainEvent::new(
            Some(user.id),
            AccountEvent::Registered {
                user_id: user.id,
                email: user.email.clone(),
            }
            .into(),
        ));

        Ok(AuthOutcome { user, session })
    }

    /// Verifies credentials and starts a session.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip_address: Option<String>,
    ) -> Result<AuthOutcome, AppError> {
        let invalid = || AppError::unauthorized("Invalid email or password");

        let Some(user) = self.user_repo.find_by_email(email).await? else {
            warn!(email, "Login attempt for unknown email");
            return Err(invalid());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(invalid());
        }

        let session = self.sessions.create(user.id).await?;

        info!(user_id = %user.id, "Login successful");
        self.bus.publish(DomainEvent::new(
            Some(user.id),
            AccountEvent::LoggedIn {
                user_id: user.id,
                ip_address,
            }
            .into(),
        ));

        Ok(AuthOutcome { user, session })
    }

    /// Ends the current session.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.sessions.invalidate(&ctx.session_id).await?;

        info!(user_id = %ctx.user_id, "Logout successful");
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            AccountEvent::LoggedOut {
                user_id: ctx.user_id,
            }
            .into(),
        ));
        Ok(())
    }

    /// Ends every session of the current user, on all devices.
    pub async fn logout_all(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        let count = self.sessions.invalidate_all_for_user(ctx.user_id).await?;

        info!(user_id = %ctx.user_id, count, "Logged out everywhere");
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            AccountEvent::LoggedOut {
                user_id: ctx.user_id,
            }
            .into(),
        ));
        Ok(count)
    }

    /// Loads the current user.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized - Invalid session"))
    }
}
