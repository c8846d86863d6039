// Test fixtures are allowed to use unwrap/expect for clear failure messages
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Test fixtures and utilities for Skilldir integration tests.
//!
//! This crate provides shared test helpers to eliminate duplication across
//! integration tests. All functions are designed to work with the
//! Axum-based API and memory-backed storage.
//!
//! # Usage
//!
//! ```rust,no_run
//! use skilldir_test_fixtures::{create_test_app, create_test_state, login_user};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let state = create_test_state();
//!     let app = create_test_app(state);
//!
//!     let session = login_user(&app, "idp|1", "Test User", "test@example.com").await;
//!     // Use session cookie for authenticated requests...
//! }
//! ```

#![deny(unsafe_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use skilldir_api::{AppState, create_router_with_state, handlers::auth::test_support};
use skilldir_core::IdentityClaims;
use skilldir_storage::Backend;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Creates a test AppState with in-memory storage backend.
///
/// The state is configured with the well-known test identity-provider
/// settings from `test_support`, a recording mock email sender, and a
/// disabled leaderboard cache.
pub fn create_test_state() -> AppState {
    let backend = Backend::memory();
    AppState::new_test(Arc::new(backend))
}

/// Creates a fully configured Axum router with all middleware and routes.
pub fn create_test_app(state: AppState) -> axum::Router {
    create_router_with_state(state)
}

/// Signs an identity-provider ID token the test verifier accepts.
///
/// Uses the HS256 secret, issuer and audience from `test_support`, with a
/// 10 minute expiry.
pub fn mint_id_token(subject: &str, name: &str, email: &str) -> String {
    let claims = IdentityClaims {
        iss: test_support::IDP_ISSUER.to_string(),
        sub: subject.to_string(),
        aud: test_support::IDP_AUDIENCE.to_string(),
        exp: Utc::now().timestamp() + 600,
        email: email.to_string(),
        name: name.to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(test_support::IDP_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Extracts the session cookie value from HTTP response headers.
///
/// Parses the `Set-Cookie` header to extract the `skilldir_session`
/// cookie value.
pub fn extract_session_cookie(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| {
            s.split(';').next().and_then(|cookie| cookie.strip_prefix("skilldir_session="))
        })
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Logs in through the identity-provider flow and returns the session cookie.
///
/// Mints an ID token for the subject, posts it to `/v1/auth/login`,
/// asserts success, and extracts the session cookie. First login for a
/// subject provisions the account.
///
/// # Panics
///
/// Panics if login fails or no session cookie is returned.
pub async fn login_user(app: &axum::Router, subject: &str, name: &str, email: &str) -> String {
    use axum::http::StatusCode;

    let id_token = mint_id_token(subject, name, email);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "id_token": id_token }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK, "Login should succeed");
    extract_session_cookie(response.headers()).expect("Session cookie should be set")
}

/// Publishes a skill as the given session and returns the response body.
///
/// # Panics
///
/// Panics if the publish request does not return HTTP 201.
pub async fn publish_skill(
    app: &axum::Router,
    session: &str,
    slug: &str,
    name: &str,
) -> Value {
    use axum::http::StatusCode;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/skills")
                .header("cookie", format!("skilldir_session={session}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "slug": slug,
                        "name": name,
                        "summary": "A test skill",
                        "description": "Longer description of a test skill.",
                        "category": "unit_testing",
                        "tags": ["testing"]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED, "Publishing should succeed");
    body_json(response).await
}

/// Records one install for a skill.
pub async fn install_skill(app: &axum::Router, slug: &str) {
    use axum::http::StatusCode;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/skills/{slug}/install"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK, "Install should succeed");
}

/// Parses an HTTP response body as JSON.
///
/// # Panics
///
/// Panics if the body cannot be read or parsed as valid JSON.
pub async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
