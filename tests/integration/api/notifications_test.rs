//! Notification API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{signup_user, TestApp};

#[tokio::test]
async fn test_no_notifications_initially() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app.get("/api/notifications", &alice.cookie).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_follow_notifies_target() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;
    let bob = signup_user(&app, "bob").await;

    app.post(&format!("/api/users/follow/{}", bob.id), &alice.cookie, json!({}))
        .await;

    let response = app.get("/api/notifications", &bob.cookie).await;
    let notifications = response.body.as_array().unwrap().clone();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "follow");
    assert_eq!(notifications[0]["from"]["username"], "alice");
    assert_eq!(notifications[0]["from"]["_id"], alice.id.to_string());
    assert_eq!(notifications[0]["to"], bob.id.to_string());
    assert_eq!(notifications[0]["read"], false);

    // The follower gets nothing.
    let response = app.get("/api/notifications", &alice.cookie).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_unfollow_does_not_notify() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;
    let bob = signup_user(&app, "bob").await;
    let uri = format!("/api/users/follow/{}", bob.id);

    app.post(&uri, &alice.cookie, json!({})).await;
    app.post(&uri, &alice.cookie, json!({})).await;

    let response = app.get("/api/notifications", &bob.cookie).await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_like_notifies_post_owner() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;
    let bob = signup_user(&app, "bob").await;

    let response = app
        .post("/api/posts/create", &alice.cookie, json!({ "text": "hi" }))
        .await;
    let post_id = response.body["post"]["_id"].as_str().unwrap().to_string();

    app.post(&format!("/api/posts/like/{post_id}"), &bob.cookie, json!({}))
        .await;

    let response = app.get("/api/notifications", &alice.cookie).await;
    let notifications = response.body.as_array().unwrap().clone();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "like");
    assert_eq!(notifications[0]["from"]["username"], "bob");
    assert_eq!(notifications[0]["to"], alice.id.to_string());
    assert_eq!(notifications[0]["post"], post_id);
}

#[tokio::test]
async fn test_notifications_newest_first_and_mark_read() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;
    let bob = signup_user(&app, "bob").await;

    let response = app
        .post("/api/posts/create", &alice.cookie, json!({ "text": "hi" }))
        .await;
    let post_id = response.body["post"]["_id"].as_str().unwrap().to_string();

    app.post(&format!("/api/users/follow/{}", alice.id), &bob.cookie, json!({}))
        .await;
    app.post(&format!("/api/posts/like/{post_id}"), &bob.cookie, json!({}))
        .await;

    let response = app.get("/api/notifications", &alice.cookie).await;
    let kinds: Vec<_> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["like", "follow"]);

    let response = app
        .post("/api/notifications/read", &alice.cookie, json!({}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true, "updated": 2 }));

    let response = app
        .post("/api/notifications/read", &alice.cookie, json!({}))
        .await;
    assert_eq!(response.body, json!({ "success": true, "updated": 0 }));

    let response = app.get("/api/notifications", &alice.cookie).await;
    assert!(response
        .body
        .as_array()
        .unwrap()
        .iter()
        .all(|n| n["read"] == true));
}
