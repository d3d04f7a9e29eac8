//! Account API integration tests
//!
//! Profiles, the follow graph, suggestions, profile updates and password
//! changes.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use socialhub::backend::media::public_id_from_url;

use crate::common::{signup_user, FailingMediaStore, TestApp, TestUser, TEST_PASSWORD};

fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

async fn profile(app: &TestApp, viewer: &TestUser, username: &str) -> Value {
    let response = app
        .get(&format!("/api/users/profile/{username}"), &viewer.cookie)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body
}

async fn follow(app: &TestApp, follower: &TestUser, target: &TestUser) -> Value {
    let response = app
        .post(&format!("/api/users/follow/{}", target.id), &follower.cookie, json!({}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body
}

#[tokio::test]
async fn test_get_profile() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;
    signup_user(&app, "bob").await;

    let body = profile(&app, &alice, "bob").await;

    assert_eq!(body["username"], "bob");
    assert_eq!(body["fullName"], "Test bob");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_get_profile_unknown_user() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app.get("/api/users/profile/ghost", &alice.cookie).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn test_follow_then_unfollow_restores_graph() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;
    let bob = signup_user(&app, "bob").await;

    let body = follow(&app, &alice, &bob).await;
    assert_eq!(
        body,
        json!({ "success": true, "message": "User followed successfully" })
    );

    assert_eq!(ids(&profile(&app, &alice, "alice").await["following"]), vec![bob.id.to_string()]);
    assert_eq!(ids(&profile(&app, &alice, "bob").await["followers"]), vec![alice.id.to_string()]);

    let body = follow(&app, &alice, &bob).await;
    assert_eq!(body["message"], "User unfollowed successfully");

    let alice_profile = profile(&app, &alice, "alice").await;
    let bob_profile = profile(&app, &alice, "bob").await;
    assert_eq!(alice_profile["following"], json!([]));
    assert_eq!(alice_profile["followers"], json!([]));
    assert_eq!(bob_profile["followers"], json!([]));
    assert_eq!(bob_profile["following"], json!([]));
}

#[tokio::test]
async fn test_follow_self_is_rejected() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(&format!("/api/users/follow/{}", alice.id), &alice.cookie, json!({}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({ "error": "You cant follow or unfollow yourself" })
    );
}

#[tokio::test]
async fn test_follow_unknown_user() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(
            &format!("/api/users/follow/{}", uuid::Uuid::new_v4()),
            &alice.cookie,
            json!({}),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "User not found" }));

    let response = app
        .post("/api/users/follow/not-a-uuid", &alice.cookie, json!({}))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suggestions_exclude_self_and_followed() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;
    let bob = signup_user(&app, "bob").await;
    for name in ["carol", "dave", "erin", "frank", "grace"] {
        signup_user(&app, name).await;
    }
    follow(&app, &alice, &bob).await;

    // The sample is random; the exclusions must hold on every draw.
    for _ in 0..5 {
        let response = app.get("/api/users/suggested", &alice.cookie).await;
        assert_eq!(response.status, StatusCode::OK);

        let suggested = response.body.as_array().cloned().unwrap_or_default();
        assert!(suggested.len() <= 4);
        assert!(!suggested.is_empty());
        for user in &suggested {
            assert_ne!(user["username"], "alice");
            assert_ne!(user["username"], "bob");
            assert!(user.get("password").is_none());
        }
    }
}

#[tokio::test]
async fn test_suggestions_empty_when_alone() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app.get("/api/users/suggested", &alice.cookie).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_update_profile_keeps_empty_fields() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(
            "/api/users/update",
            &alice.cookie,
            json!({ "fullName": "Alice Liddell", "bio": "down the hole", "link": "" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["fullName"], "Alice Liddell");
    assert_eq!(response.body["bio"], "down the hole");

    let response = app
        .post(
            "/api/users/update",
            &alice.cookie,
            json!({ "fullName": "", "bio": "", "email": "", "username": "" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["fullName"], "Alice Liddell");
    assert_eq!(response.body["bio"], "down the hole");
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], alice.email);
    assert!(response.body.get("password").is_none());
}

#[tokio::test]
async fn test_update_profile_rejects_taken_email_and_username() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;
    let bob = signup_user(&app, "bob").await;

    let response = app
        .post("/api/users/update", &alice.cookie, json!({ "email": bob.email }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body, json!({ "error": "Email already exists" }));

    let response = app
        .post("/api/users/update", &alice.cookie, json!({ "username": "bob" }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body, json!({ "error": "Username already exists" }));

    let response = app
        .post("/api/users/update", &alice.cookie, json!({ "email": "nope" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "error": "Invalid Email Format" }));

    let body = profile(&app, &alice, "alice").await;
    assert_eq!(body["email"], alice.email);
}

#[tokio::test]
async fn test_update_profile_changes_username() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post("/api/users/update", &alice.cookie, json!({ "username": "alice2" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice2");

    let response = app.get("/api/users/profile/alice", &alice.cookie).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let body = profile(&app, &alice, "alice2").await;
    assert_eq!(body["_id"], alice.id.to_string());
}

#[tokio::test]
async fn test_update_profile_image_replaces_previous() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(
            "/api/users/update",
            &alice.cookie,
            json!({ "profileImg": "data:image/png;base64,AAAA" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let first = response.body["profileImg"].as_str().unwrap().to_string();
    assert!(first.starts_with("memory://media/"));
    let first_id = public_id_from_url(&first).unwrap().to_string();
    assert!(app.media.contains(&first_id).await);

    let response = app
        .post(
            "/api/users/update",
            &alice.cookie,
            json!({ "profileImg": "data:image/png;base64,BBBB", "coverImg": "data:image/png;base64,CCCC" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let second = response.body["profileImg"].as_str().unwrap();
    assert_ne!(second, first);
    assert!(response.body["coverImg"].is_string());

    assert!(!app.media.contains(&first_id).await);
    assert_eq!(app.media.len().await, 2);
}

#[tokio::test]
async fn test_update_profile_media_failure_is_internal() {
    let app = TestApp::with_media_store(Arc::new(FailingMediaStore)).await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(
            "/api/users/update",
            &alice.cookie,
            json!({ "bio": "new bio", "profileImg": "data:image/png;base64,AAAA" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({ "error": "Internal Server Error" }));

    let body = profile(&app, &alice, "alice").await;
    assert_eq!(body["profileImg"], Value::Null);
    assert_eq!(body["bio"], Value::Null);
}

#[tokio::test]
async fn test_change_password_requires_both_fields() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(
            "/api/users/changePassword",
            &alice.cookie,
            json!({ "currentPassword": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({ "error": "Current and new password are required" })
    );
}

#[tokio::test]
async fn test_change_password_wrong_current() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(
            "/api/users/changePassword",
            &alice.cookie,
            json!({ "currentPassword": "not-it", "newPassword": "another1" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({ "error": "Current password is incorrect" })
    );
}

#[tokio::test]
async fn test_change_password_too_short() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(
            "/api/users/changePassword",
            &alice.cookie,
            json!({ "currentPassword": TEST_PASSWORD, "newPassword": "123" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({ "error": "Password must be at least 6 characters" })
    );
}

#[tokio::test]
async fn test_change_password_then_login() {
    let app = TestApp::new().await;
    let alice = signup_user(&app, "alice").await;

    let response = app
        .post(
            "/api/users/changePassword",
            &alice.cookie,
            json!({ "currentPassword": TEST_PASSWORD, "newPassword": "another1" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "success": true, "message": "Password updated successfully" })
    );

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "another1" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
