//! Shared test helpers for integration tests.
//!
//! Tests need a PostgreSQL database named by `EVENTHUB_TEST_DATABASE_URL`;
//! without it every test returns early. Each test registers users with
//! unique emails, so tests can share one database and run in parallel.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use eventhub_core::config::AppConfig;
use eventhub_core::events::EventBus;
use eventhub_database::DatabasePool;
use eventhub_storage::StorageManager;

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "EVENTHUB_TEST_DATABASE_URL";

/// Smallest byte sequence recognised as a PNG.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x02\0\0\0";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Root of the local media store
    pub media: TempDir,
}

/// A registered user and their session cookie.
#[derive(Debug, Clone)]
pub struct TestUser {
    /// User ID
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// `name=value` pair to send in the `Cookie` header
    pub cookie: String,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// `Set-Cookie` headers
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// The `name=value` pair of the session cookie set by this response.
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookies
            .iter()
            .filter(|c| c.starts_with("auth_session="))
            .filter_map(|c| c.split(';').next())
            .map(str::to_string)
            .next()
    }

    /// Error message of an error response.
    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is
    /// configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
            eprintln!("{DATABASE_URL_VAR} not set; skipping database test");
            return None;
        };

        let media = tempfile::tempdir().expect("Failed to create media dir");
        let mut config = AppConfig::with_database_url(url);
        config.database.max_connections = 5;
        config.storage.local.root_path = media.path().to_string_lossy().into_owned();

        let database = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        eventhub_database::migration::run_migrations(database.pool())
            .await
            .expect("Failed to run migrations");
        let db_pool = database.into_pool();

        let storage = StorageManager::from_config(&config.storage)
            .await
            .expect("Failed to init storage");

        let state = eventhub_api::AppState::new(
            config.clone(),
            db_pool.clone(),
            Arc::new(storage),
            EventBus::new(),
        );
        let router = eventhub_api::build_router(state);

        Some(Self {
            router,
            db_pool,
            config,
            media,
        })
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        send(self.router.clone(), req).await
    }

    /// Upload a single multipart field
    pub async fn upload(
        &self,
        path: &str,
        cookie: &str,
        field: &str,
        content_type: &str,
        data: &[u8],
    ) -> TestResponse {
        let boundary = "eventhub-test-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"banner\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .expect("Failed to build request");

        send(self.router.clone(), req).await
    }

    /// Register a user with a unique email and return their session
    pub async fn register(&self, name: &str) -> TestUser {
        let email = format!("{name}-{}@example.com", Uuid::new_v4().simple());
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({
                    "email": email,
                    "password": "password123",
                    "name": name,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );

        let id = response.body["data"]["user"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No user id in registration response");
        let cookie = response
            .session_cookie()
            .expect("No session cookie in registration response");

        TestUser { id, email, cookie }
    }

    /// Create an event owned by `user` and return its ID
    pub async fn create_event(&self, user: &TestUser, extra: Value) -> String {
        let mut body = json!({
            "title": format!("Event {}", Uuid::new_v4().simple()),
            "date": future_date(),
        });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }

        let response = self
            .request("POST", "/api/events", Some(body), Some(&user.cookie))
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Event creation failed: {:?}",
            response.body
        );

        response.body["data"]["event"]["id"]
            .as_str()
            .expect("No event id in response")
            .to_string()
    }

    /// Number of attendance rows for an event
    pub async fn attendee_rows(&self, event_id: &str) -> i64 {
        let id: Uuid = event_id.parse().expect("event id");
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendees WHERE event_id = $1")
            .bind(id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count attendees")
    }
}

/// Send a request through a router and collect the response
pub async fn send(router: Router, req: Request<Body>) -> TestResponse {
    let response = router.oneshot(req).await.expect("Failed to send request");

    let status = response.status();
    let set_cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();
    let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        body,
        set_cookies,
    }
}

/// An RFC 3339 date a month from now
pub fn future_date() -> String {
    (Utc::now() + Duration::days(30)).to_rfc3339()
}
