//! Integration tests for the event endpoints.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, future_date};

#[tokio::test]
async fn test_create_event_returns_creator_and_count() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("creator").await;

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "title": "Rust Meetup",
                "description": "Talks and pizza",
                "date": future_date(),
                "location": "Berlin",
                "maxAttendees": 50,
            })),
            Some(&owner.cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Event created successfully");
    let event = &response.body["data"]["event"];
    assert_eq!(event["title"], "Rust Meetup");
    assert_eq!(event["maxAttendees"], 50);
    assert_eq!(event["createdBy"], owner.id.to_string());
    assert_eq!(event["creator"]["email"], owner.email);
    assert_eq!(event["attendeeCount"], 0);
    assert!(event["bannerUrl"].is_null());
}

#[tokio::test]
async fn test_create_event_in_the_past_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("past").await;
    let title = format!("Past {}", Uuid::new_v4().simple());

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "title": title,
                "date": (Utc::now() - Duration::days(1)).to_rfc3339(),
            })),
            Some(&owner.cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "Event date must be in the future");

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE title = $1")
        .bind(&title)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_create_event_validates_fields() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("fields").await;

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "title": "ab",
                "date": future_date(),
                "maxAttendees": 0,
            })),
            Some(&owner.cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response
            .error_message()
            .contains("maxAttendees must be a positive integer")
    );
}

#[tokio::test]
async fn test_get_event() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("getter").await;
    let id = app.create_event(&owner, json!({ "location": "Oslo" })).await;

    let found = app.request("GET", &format!("/api/events/{id}"), None, None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["event"]["id"], id);
    assert_eq!(found.body["data"]["event"]["location"], "Oslo");

    let missing = app
        .request("GET", &format!("/api/events/{}", Uuid::new_v4()), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_message(), "Event not found");
}

#[tokio::test]
async fn test_list_events_pagination_meta() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("lister").await;
    for _ in 0..3 {
        app.create_event(&owner, json!({})).await;
    }

    let response = app
        .request("GET", "/api/events?page=1&limit=2", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let events = response.body["data"]["events"].as_array().expect("events");
    assert_eq!(events.len(), 2);

    let meta = &response.body["data"]["pagination"];
    let total = meta["total"].as_u64().expect("total");
    assert!(total >= 3);
    assert_eq!(meta["page"], 1);
    assert_eq!(meta["limit"], 2);
    assert_eq!(meta["totalPages"], total.div_ceil(2));
    assert_eq!(meta["hasNext"], true);
    assert_eq!(meta["hasPrev"], false);
}

#[tokio::test]
async fn test_list_events_sorted_by_title_desc() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("sorter").await;
    app.create_event(&owner, json!({})).await;
    app.create_event(&owner, json!({})).await;

    let response = app
        .request("GET", "/api/events?sort=title&order=desc&limit=100", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let titles: Vec<String> = response.body["data"]["events"]
        .as_array()
        .expect("events")
        .iter()
        .filter_map(|e| e["title"].as_str().map(str::to_string))
        .filter(|t| t.starts_with("Event ") && t.len() == "Event ".len() + 32)
        .collect();
    assert!(titles.len() >= 2);
    assert!(titles.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_update_by_owner() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("updater").await;
    let id = app
        .create_event(&owner, json!({ "location": "Lisbon", "maxAttendees": 10 }))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/events/{id}"),
            Some(json!({ "title": "Renamed event", "location": null })),
            Some(&owner.cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Event updated successfully");
    let event = &response.body["data"]["event"];
    assert_eq!(event["title"], "Renamed event");
    assert!(event["location"].is_null());
    assert_eq!(event["maxAttendees"], 10);
}

#[tokio::test]
async fn test_empty_update_bumps_updated_at() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("toucher").await;
    let id = app.create_event(&owner, json!({ "location": "Oslo" })).await;

    let before = app.request("GET", &format!("/api/events/{id}"), None, None).await;
    let created_at: chrono::DateTime<Utc> =
        serde_json::from_value(before.body["data"]["event"]["updatedAt"].clone())
            .expect("updatedAt");

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let response = app
        .request("PUT", &format!("/api/events/{id}"), Some(json!({})), Some(&owner.cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let event = &response.body["data"]["event"];
    let updated_at: chrono::DateTime<Utc> =
        serde_json::from_value(event["updatedAt"].clone()).expect("updatedAt");
    assert!(updated_at > created_at);
    assert_eq!(event["location"], "Oslo");
}

#[tokio::test]
async fn test_update_by_non_owner_is_forbidden() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("owner").await;
    let other = app.register("intruder").await;
    let id = app.create_event(&owner, json!({ "location": "Rome" })).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/events/{id}"),
            Some(json!({ "title": "Hijacked", "location": "Elsewhere" })),
            Some(&other.cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.error_message(),
        "You are not authorized to update this event"
    );

    let found = app.request("GET", &format!("/api/events/{id}"), None, None).await;
    assert_eq!(found.body["data"]["event"]["location"], "Rome");
    assert_ne!(found.body["data"]["event"]["title"], "Hijacked");
}

#[tokio::test]
async fn test_update_to_past_date_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("pastupdate").await;
    let id = app.create_event(&owner, json!({})).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/events/{id}"),
            Some(json!({ "date": (Utc::now() - Duration::hours(1)).to_rfc3339() })),
            Some(&owner.cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "Event date must be in the future");
}

#[tokio::test]
async fn test_delete_event() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("deleter").await;
    let other = app.register("bystander").await;
    let id = app.create_event(&owner, json!({})).await;

    let forbidden = app
        .request("DELETE", &format!("/api/events/{id}"), None, Some(&other.cookie))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request("DELETE", &format!("/api/events/{id}"), None, Some(&owner.cookie))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Event deleted successfully");

    let found = app.request("GET", &format!("/api/events/{id}"), None, None).await;
    assert_eq!(found.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_created_events() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("mine").await;
    let first = app.create_event(&owner, json!({})).await;
    let second = app.create_event(&owner, json!({})).await;

    let response = app
        .request("GET", "/api/events/user/created", None, Some(&owner.cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response.body["data"]["events"]
        .as_array()
        .expect("events")
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.as_str()));
    assert!(ids.contains(&second.as_str()));
}
