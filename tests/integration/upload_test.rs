//! Integration tests for banner upload and removal.

mod helpers;

use std::path::PathBuf;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{PNG_BYTES, TestApp};

fn banner_path(id: &str) -> String {
    format!("/api/upload/{id}/banner")
}

/// Location on disk of a banner served under `/media`.
fn stored_file(app: &TestApp, banner_url: &str) -> PathBuf {
    let key = banner_url
        .strip_prefix("/media/")
        .expect("banner url under /media");
    app.media.path().join(key)
}

#[tokio::test]
async fn test_upload_banner() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("uploader").await;
    let id = app.create_event(&owner, json!({})).await;

    let response = app
        .upload(&banner_path(&id), &owner.cookie, "banner", "image/png", PNG_BYTES)
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["message"], "Banner uploaded successfully");
    let url = response.body["data"]["bannerUrl"].as_str().expect("bannerUrl");
    assert!(url.starts_with("/media/events/events_"));
    assert!(url.ends_with(".png"));
    assert_eq!(response.body["data"]["event"]["bannerUrl"], url);
    assert_eq!(std::fs::read(stored_file(&app, url)).unwrap(), PNG_BYTES);

    let served = app.request("GET", url, None, None).await;
    assert_eq!(served.status, StatusCode::OK);
}

#[tokio::test]
async fn test_replacing_banner_removes_old_file() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("replacer").await;
    let id = app.create_event(&owner, json!({})).await;

    let first = app
        .upload(&banner_path(&id), &owner.cookie, "banner", "image/png", PNG_BYTES)
        .await;
    let old_url = first.body["data"]["bannerUrl"].as_str().expect("url").to_string();

    let second = app
        .upload(&banner_path(&id), &owner.cookie, "banner", "image/png", PNG_BYTES)
        .await;
    assert_eq!(second.status, StatusCode::OK);
    let new_url = second.body["data"]["bannerUrl"].as_str().expect("url");

    assert_ne!(old_url, new_url);
    assert!(!stored_file(&app, &old_url).exists());
    assert!(stored_file(&app, new_url).exists());
}

#[tokio::test]
async fn test_upload_by_non_owner_is_forbidden() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("owner").await;
    let other = app.register("stranger").await;
    let id = app.create_event(&owner, json!({})).await;

    let response = app
        .upload(&banner_path(&id), &other.cookie, "banner", "image/png", PNG_BYTES)
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.error_message(),
        "You are not authorized to upload banner for this event"
    );
}

#[tokio::test]
async fn test_upload_to_missing_event() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("nowhere").await;

    let response = app
        .upload(
            &banner_path(&Uuid::new_v4().to_string()),
            &owner.cookie,
            "banner",
            "image/png",
            PNG_BYTES,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_without_banner_field() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("nofile").await;
    let id = app.create_event(&owner, json!({})).await;

    let response = app
        .upload(&banner_path(&id), &owner.cookie, "avatar", "image/png", PNG_BYTES)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "No file provided");
}

#[tokio::test]
async fn test_upload_rejects_non_images() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("texter").await;
    let id = app.create_event(&owner, json!({})).await;

    let declared_text = app
        .upload(&banner_path(&id), &owner.cookie, "banner", "text/plain", b"hello")
        .await;
    assert_eq!(declared_text.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        declared_text.error_message(),
        "Invalid file type. Only images are allowed."
    );

    let disguised = app
        .upload(&banner_path(&id), &owner.cookie, "banner", "image/png", b"not really a png")
        .await;
    assert_eq!(disguised.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        disguised.error_message(),
        "Invalid file type. Only images are allowed."
    );
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("bigfile").await;
    let id = app.create_event(&owner, json!({})).await;

    let mut data = PNG_BYTES.to_vec();
    data.resize(app.config.upload.max_banner_bytes as usize + 1, 0);

    let response = app
        .upload(&banner_path(&id), &owner.cookie, "banner", "image/png", &data)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "File size exceeds 5MB limit.");

    let event = app.request("GET", &format!("/api/events/{id}"), None, None).await;
    assert!(event.body["data"]["event"]["bannerUrl"].is_null());
}

#[tokio::test]
async fn test_delete_banner() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.register("remover").await;
    let id = app.create_event(&owner, json!({})).await;

    let uploaded = app
        .upload(&banner_path(&id), &owner.cookie, "banner", "image/png", PNG_BYTES)
        .await;
    let url = uploaded.body["data"]["bannerUrl"].as_str().expect("url").to_string();

    let removed = app
        .request("DELETE", &banner_path(&id), None, Some(&owner.cookie))
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.body["message"], "Banner deleted successfully");
    assert!(removed.body["data"]["event"]["bannerUrl"].is_null());
    assert!(!stored_file(&app, &url).exists());

    let again = app
        .request("DELETE", &banner_path(&id), None, Some(&owner.cookie))
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.error_message(), "No banner to delete");
}
