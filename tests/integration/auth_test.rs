//! Integration tests for registration, login and cookie sessions.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": format!("reg-{}@example.com", uuid::Uuid::new_v4().simple()),
                "password": "password123",
                "name": "Reg User",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Registration successful");
    assert_eq!(response.body["data"]["user"]["name"], "Reg User");
    assert!(response.body["data"]["user"].get("passwordHash").is_none());
    assert!(response.body["data"]["session"]["expiresAt"].is_string());

    let cookie = response
        .set_cookies
        .iter()
        .find(|c| c.starts_with("auth_session="))
        .expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_register_duplicate_email_ignores_case() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.register("dup").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": user.email.to_uppercase(),
                "password": "password123",
                "name": "Second",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "Email already registered");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "short@example.com",
                "password": "short",
                "name": "Short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response
            .error_message()
            .contains("Password must be between 8 and 100 characters")
    );
}

#[tokio::test]
async fn test_login_and_me() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.register("login").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": user.email, "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful");
    let cookie = response.session_cookie().expect("session cookie");
    assert_ne!(cookie, user.cookie);

    let me = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["user"]["id"], user.id.to_string());
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.register("wrongpw").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": user.email, "password": "not-the-password" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody-here@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_message(), "Invalid email or password");
    assert_eq!(unknown_email.error_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_unknown_cookie_is_cleared() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request("GET", "/api/auth/me", None, Some("auth_session=bogus"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Unauthorized - Invalid session");
    assert!(
        response
            .set_cookies
            .iter()
            .any(|c| c.starts_with("auth_session=;") && c.contains("Max-Age=0"))
    );
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.register("logout").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&user.cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logout successful");
    assert!(response.set_cookies.iter().any(|c| c.contains("Max-Age=0")));

    let me = app.request("GET", "/api/auth/me", None, Some(&user.cookie)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_is_rejected_and_removed() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.register("expired").await;

    sqlx::query("UPDATE sessions SET expires_at = $1 WHERE user_id = $2")
        .bind(Utc::now() - Duration::minutes(1))
        .bind(user.id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let me = app.request("GET", "/api/auth/me", None, Some(&user.cookie)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_stale_session_is_renewed() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.register("renew").await;

    sqlx::query("UPDATE sessions SET expires_at = $1 WHERE user_id = $2")
        .bind(Utc::now() + Duration::days(1))
        .bind(user.id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let me = app.request("GET", "/api/auth/me", None, Some(&user.cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert!(me.set_cookies.iter().any(|c| c.starts_with("auth_session=")));

    let expires_at: chrono::DateTime<Utc> =
        sqlx::query_scalar("SELECT expires_at FROM sessions WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert!(expires_at > Utc::now() + Duration::days(29));
}

#[tokio::test]
async fn test_logout_all_ends_every_session() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.register("everywhere").await;
    let second = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": user.email, "password": "password123" })),
            None,
        )
        .await
        .session_cookie()
        .expect("session cookie");

    let response = app
        .request("POST", "/api/auth/logout-all", None, Some(&second))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out of all sessions");
    assert_eq!(response.body["data"]["terminated"], 2);
    assert!(response.set_cookies.iter().any(|c| c.contains("Max-Age=0")));

    for cookie in [&user.cookie, &second] {
        let me = app.request("GET", "/api/auth/me", None, Some(cookie)).await;
        assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    }
}
