//! Authentication API integration tests
//!
//! Signup, login, logout, the current-user endpoint and the auth gate.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use socialhub::backend::auth::sessions::SessionIssuer;
use uuid::Uuid;

use crate::common::{signup_user, TestApp, TEST_JWT_SECRET, TEST_PASSWORD};

fn signup_body(username: &str, email: &str, password: &str) -> serde_json::Value {
    json!({
        "fullName": "A B",
        "username": username,
        "email": email,
        "password": password,
    })
}

async fn user_count(app: &TestApp) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(signup_body("ab", "a@b.com", "secret1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "ab");
    assert_eq!(response.body["fullName"], "A B");
    assert_eq!(response.body["email"], "a@b.com");
    assert_eq!(response.body["message"], "User created successfully");
    assert_eq!(response.body["followers"], json!([]));
    assert_eq!(response.body["following"], json!([]));
    assert_eq!(response.body["likedPosts"], json!([]));
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("passwordHash").is_none());

    let cookie = response.raw_session_cookie().expect("no session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=1296000"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_signup_stores_digest_not_plaintext() {
    let app = TestApp::new().await;
    signup_user(&app, "ab").await;

    let digest: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'ab'")
        .fetch_one(&app.pool)
        .await
        .unwrap();

    assert_ne!(digest, TEST_PASSWORD);
    assert!(bcrypt::verify(TEST_PASSWORD, &digest).unwrap());
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(signup_body("ab", "not-an-email", "secret1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "error": "Invalid Email Format" }));
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "username": "ab", "password": "secret1" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "error": "All fields are required" }));
}

#[tokio::test]
async fn test_signup_short_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(signup_body("ab", "a@b.com", "12345")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({ "error": "Password must be at least 6 characters" })
    );
    assert_eq!(user_count(&app).await, 0);
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = TestApp::new().await;
    signup_user(&app, "ab").await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(signup_body("ab", "other@b.com", "secret1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body, json!({ "error": "Username already exists" }));
    assert_eq!(user_count(&app).await, 1);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new().await;
    let existing = signup_user(&app, "ab").await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(signup_body("other", &existing.email, "secret1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body, json!({ "error": "Email already exists" }));
    assert_eq!(user_count(&app).await, 1);
}

#[tokio::test]
async fn test_signup_malformed_json() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!(["not", "an", "object"])),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let user = signup_user(&app, "ab").await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "ab", "password": TEST_PASSWORD })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User logged in successfully");
    assert_eq!(response.body["_id"], user.id.to_string());
    assert!(response.body.get("password").is_none());
    assert!(response.session_cookie().is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    signup_user(&app, "ab").await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "ab", "password": "wrong-password" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body,
        json!({ "error": "Invalid username or password" })
    );
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "ghost", "password": "secret1" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body,
        json!({ "error": "Invalid username or password" })
    );
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;
    let user = signup_user(&app, "ab").await;

    let response = app
        .request(Method::POST, "/api/auth/logout", Some(user.cookie.as_str()), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "success": true, "message": "User logged out successfully" })
    );
    let cookie = response.raw_session_cookie().expect("no cookie on logout");
    assert!(cookie.starts_with("jwt=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let app = TestApp::new().await;

    let response = app.request(Method::POST, "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = TestApp::new().await;
    let user = signup_user(&app, "ab").await;

    let response = app.get("/api/auth/me", &user.cookie).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["_id"], user.id.to_string());
    assert_eq!(response.body["username"], "ab");
    assert!(response.body.get("password").is_none());
}

#[tokio::test]
async fn test_gate_rejects_missing_cookie() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "You must be logged in" }));
}

#[tokio::test]
async fn test_gate_rejects_invalid_token() {
    let app = TestApp::new().await;

    let response = app.get("/api/auth/me", "jwt=not.a.token").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "Invalid Token" }));
}

#[tokio::test]
async fn test_gate_rejects_token_signed_with_other_secret() {
    let app = TestApp::new().await;
    let user = signup_user(&app, "ab").await;
    let token = SessionIssuer::new("some-other-secret").issue(user.id).unwrap();

    let response = app.get("/api/auth/me", &format!("jwt={token}")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "Invalid Token" }));
}

#[tokio::test]
async fn test_gate_rejects_expired_token() {
    let app = TestApp::new().await;
    let user = signup_user(&app, "ab").await;
    let token = SessionIssuer::with_ttl(TEST_JWT_SECRET, chrono::Duration::hours(-2))
        .issue(user.id)
        .unwrap();

    let response = app.get("/api/auth/me", &format!("jwt={token}")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "Invalid Token" }));
}

#[tokio::test]
async fn test_gate_rejects_unknown_user() {
    let app = TestApp::new().await;
    let token = SessionIssuer::new(TEST_JWT_SECRET).issue(Uuid::new_v4()).unwrap();

    let response = app.get("/api/auth/me", &format!("jwt={token}")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/nope", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "Not Found" }));
}
