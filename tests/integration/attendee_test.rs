//! Integration tests for joining and leaving events.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

#[tokio::test]
async fn test_join_event() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let guest = app.register("guest").await;
    let id = app.create_event(&owner, json!({})).await;

    let response = app
        .request("POST", &format!("/api/attendees/{id}/join"), None, Some(&guest.cookie))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Successfully joined event");
    let attendee = &response.body["data"]["attendee"];
    assert_eq!(attendee["eventId"], id);
    assert_eq!(attendee["user"]["id"], guest.id.to_string());

    let event = app.request("GET", &format!("/api/events/{id}"), None, None).await;
    assert_eq!(event.body["data"]["event"]["attendeeCount"], 1);
}

#[tokio::test]
async fn test_duplicate_join_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let guest = app.register("guest").await;
    let id = app.create_event(&owner, json!({})).await;
    let path = format!("/api/attendees/{id}/join");

    app.request("POST", &path, None, Some(&guest.cookie)).await;
    let again = app.request("POST", &path, None, Some(&guest.cookie)).await;

    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.error_message(), "Already joined this event");
    assert_eq!(app.attendee_rows(&id).await, 1);
}

#[tokio::test]
async fn test_owner_cannot_join() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("selfjoin").await;
    let id = app.create_event(&owner, json!({})).await;

    let response = app
        .request("POST", &format!("/api/attendees/{id}/join"), None, Some(&owner.cookie))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_message(),
        "Event creator cannot join their own event"
    );
    assert_eq!(app.attendee_rows(&id).await, 0);
}

#[tokio::test]
async fn test_join_full_event() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let first = app.register("first").await;
    let second = app.register("second").await;
    let id = app.create_event(&owner, json!({ "maxAttendees": 1 })).await;
    let path = format!("/api/attendees/{id}/join");

    let joined = app.request("POST", &path, None, Some(&first.cookie)).await;
    assert_eq!(joined.status, StatusCode::CREATED);

    let refused = app.request("POST", &path, None, Some(&second.cookie)).await;
    assert_eq!(refused.status, StatusCode::BAD_REQUEST);
    assert_eq!(refused.error_message(), "Event is full");
    assert_eq!(app.attendee_rows(&id).await, 1);
}

#[tokio::test]
async fn test_concurrent_joins_respect_capacity() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let id = app.create_event(&owner, json!({ "maxAttendees": 3 })).await;

    let mut guests = Vec::new();
    for i in 0..8 {
        guests.push(app.register(&format!("racer{i}")).await);
    }

    let handles: Vec<_> = guests
        .into_iter()
        .map(|guest| {
            let router = app.router.clone();
            let path = format!("/api/attendees/{id}/join");
            tokio::spawn(async move {
                let req = Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::COOKIE, guest.cookie)
                    .body(Body::empty())
                    .unwrap();
                helpers::send(router, req).await.status
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let status = handle.await.unwrap();
        if status == StatusCode::CREATED {
            created += 1;
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    assert_eq!(created, 3);
    assert_eq!(app.attendee_rows(&id).await, 3);
}

#[tokio::test]
async fn test_join_missing_event() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let guest = app.register("lost").await;

    let response = app
        .request(
            "POST",
            &format!("/api/attendees/{}/join", Uuid::new_v4()),
            None,
            Some(&guest.cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_message(), "Event not found");
}

#[tokio::test]
async fn test_leave_event() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let guest = app.register("leaver").await;
    let id = app.create_event(&owner, json!({})).await;

    app.request("POST", &format!("/api/attendees/{id}/join"), None, Some(&guest.cookie))
        .await;

    let left = app
        .request("DELETE", &format!("/api/attendees/{id}/leave"), None, Some(&guest.cookie))
        .await;
    assert_eq!(left.status, StatusCode::OK);
    assert_eq!(left.body["message"], "Successfully left event");
    assert_eq!(app.attendee_rows(&id).await, 0);

    let again = app
        .request("DELETE", &format!("/api/attendees/{id}/leave"), None, Some(&guest.cookie))
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.error_message(), "Not attending this event");
}

#[tokio::test]
async fn test_list_attendees() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let guest = app.register("listed").await;
    let id = app.create_event(&owner, json!({})).await;

    app.request("POST", &format!("/api/attendees/{id}/join"), None, Some(&guest.cookie))
        .await;

    let response = app.request("GET", &format!("/api/attendees/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let attendees = response.body["data"]["attendees"].as_array().expect("attendees");
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0]["user"]["email"], guest.email);

    let missing = app
        .request("GET", &format!("/api/attendees/{}", Uuid::new_v4()), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_joined_events() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let guest = app.register("joiner").await;
    let id = app.create_event(&owner, json!({})).await;
    app.create_event(&owner, json!({})).await;

    app.request("POST", &format!("/api/attendees/{id}/join"), None, Some(&guest.cookie))
        .await;

    let response = app
        .request("GET", "/api/attendees/user/joined", None, Some(&guest.cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let events = response.body["data"]["events"].as_array().expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["id"], id);
}

#[tokio::test]
async fn test_lowering_capacity_below_attendance() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let alpha = app.register("alpha").await;
    let bravo = app.register("bravo").await;
    let id = app.create_event(&owner, json!({ "maxAttendees": 5 })).await;

    for guest in [&alpha, &bravo] {
        let joined = app
            .request("POST", &format!("/api/attendees/{id}/join"), None, Some(&guest.cookie))
            .await;
        assert_eq!(joined.status, StatusCode::CREATED);
    }
    assert_eq!(app.attendee_rows(&id).await, 2);

    let response = app
        .request(
            "PUT",
            &format!("/api/events/{id}"),
            Some(json!({ "maxAttendees": 1 })),
            Some(&owner.cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error_message().contains("(2)"));
}

#[tokio::test]
async fn test_deleting_event_removes_attendance() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("host").await;
    let guest = app.register("cascade").await;
    let id = app.create_event(&owner, json!({})).await;

    app.request("POST", &format!("/api/attendees/{id}/join"), None, Some(&guest.cookie))
        .await;
    assert_eq!(app.attendee_rows(&id).await, 1);

    app.request("DELETE", &format!("/api/events/{id}"), None, Some(&owner.cookie))
        .await;
    assert_eq!(app.attendee_rows(&id).await, 0);
}
