//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use eventhub_auth::{PasswordHasher, SessionManager};
use eventhub_core::config::AppConfig;
use eventhub_core::events::EventBus;
use eventhub_database::repositories::{
    AttendeeRepository, EventRepository, SessionRepository, UserRepository,
};
use eventhub_service::{AttendeeService, AuthService, BannerService, EventService};
use eventhub_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheaply cloneable.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Banner media storage
    pub storage: Arc<StorageManager>,
    /// Domain event bus
    pub bus: EventBus,

    // ── Auth ─────────────────────────────────────────────────
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub auth_service: Arc<AuthService>,
    /// Event catalog
    pub event_service: Arc<EventService>,
    /// Join and leave
    pub attendee_service: Arc<AttendeeService>,
    /// Banner upload and removal
    pub banner_service: Arc<BannerService>,
}

impl AppState {
    /// Wires repositories, the session manager and services over a pool.
    pub fn new(
        config: AppConfig,
        db_pool: PgPool,
        storage: Arc<StorageManager>,
        bus: EventBus,
    ) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
        let event_repo = Arc::new(EventRepository::new(db_pool.clone()));
        let attendee_repo = Arc::new(AttendeeRepository::new(db_pool.clone()));

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&session_repo),
            Arc::clone(&user_repo),
            &config.session,
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::new(PasswordHasher::new()),
            Arc::clone(&session_manager),
            bus.clone(),
        ));
        let event_service = Arc::new(EventService::new(
            Arc::clone(&event_repo),
            Arc::clone(&storage),
            bus.clone(),
        ));
        let attendee_service = Arc::new(AttendeeService::new(
            Arc::clone(&event_repo),
            Arc::clone(&attendee_repo),
            bus.clone(),
        ));
        let banner_service = Arc::new(BannerService::new(
            Arc::clone(&event_repo),
            Arc::clone(&storage),
            config.upload.clone(),
            bus.clone(),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            storage,
            bus,
            session_manager,
            auth_service,
            event_service,
            attendee_service,
            banner_service,
        }
    }
}
