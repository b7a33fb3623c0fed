//! EventHub Server: events, attendees and banner images over a REST API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_subscriber::{EnvFilter, fmt};

use eventhub_core::config::{AppConfig, LogFormat};
use eventhub_core::error::AppError;
use eventhub_core::events::{EventBus, Subscription};

/// How often expired sessions are purged.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("EVENTHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        environment = %config.server.environment,
        "Starting EventHub v{}",
        env!("CARGO_PKG_VERSION")
    );

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let database = eventhub_database::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    eventhub_database::migration::run_migrations(database.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Initialize media storage ─────────────────────────
    tracing::info!("Initializing media storage...");
    let storage = eventhub_storage::StorageManager::from_config(&config.storage).await?;
    let storage = Arc::new(storage);
    tracing::info!("Media storage initialized");

    // ── Step 3: Event bus + activity logger ──────────────────────
    let bus = EventBus::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let activity_handle = spawn_activity_logger(bus.subscribe(), shutdown_rx.clone());

    // ── Step 4: Repositories, sessions and services ──────────────
    let state = eventhub_api::AppState::new(
        config.clone(),
        database.pool().clone(),
        Arc::clone(&storage),
        bus,
    );
    tracing::info!("Services initialized");

    // ── Step 5: Session cleanup task ─────────────────────────────
    let cleanup_handle = spawn_session_cleanup(
        Arc::clone(&state.session_manager),
        shutdown_rx.clone(),
    );

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app = eventhub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("EventHub server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 8: Wait for background tasks ────────────────────────
    tracing::info!("Waiting for background tasks to complete...");
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, cleanup_handle).await;
    let _ = tokio::time::timeout(grace, activity_handle).await;

    database.close().await;
    tracing::info!("EventHub server shut down gracefully");
    Ok(())
}

/// Log every domain event until shutdown
fn spawn_activity_logger(
    mut subscription: Subscription,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                event = subscription.recv() => {
                    let Some(event) = event else { break };
                    tracing::info!(
                        target: "eventhub::activity",
                        event = event.name(),
                        actor_id = ?event.actor_id,
                        payload = ?event.payload,
                        "Domain event"
                    );
                }
                _ = shutdown.changed() => break,
            }
        }
        subscription.unsubscribe();
    })
}

/// Purge expired sessions periodically until shutdown
fn spawn_session_cleanup(
    sessions: Arc<eventhub_auth::SessionManager>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = sessions.cleanup_expired().await {
                        tracing::warn!(error = %e, "Session cleanup failed");
                    }
                }
                _ = shutdown.changed() => break,
            }
        }
    })
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
