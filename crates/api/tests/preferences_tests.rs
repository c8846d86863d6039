#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Integration tests for notification preference reads and writes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use skilldir_test_fixtures::{body_json, create_test_app, create_test_state, login_user};
use tower::ServiceExt;

#[tokio::test]
async fn test_defaults_are_all_enabled() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|fresh", "Fresh", "fresh@test.com").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/users/me/preferences")
                .header("cookie", format!("skilldir_session={session}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["preferences"]["marketing"].as_bool().unwrap());
    assert!(json["preferences"]["product_updates"].as_bool().unwrap());
    assert!(json["preferences"]["weekly_digest"].as_bool().unwrap());
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|picky", "Picky", "picky@test.com").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/v1/users/me/preferences")
                .header("cookie", format!("skilldir_session={session}"))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "marketing": false }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(!json["preferences"]["marketing"].as_bool().unwrap());
    assert!(json["preferences"]["weekly_digest"].as_bool().unwrap());

    // The write persisted
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/users/me/preferences")
                .header("cookie", format!("skilldir_session={session}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert!(!json["preferences"]["marketing"].as_bool().unwrap());
}

#[tokio::test]
async fn test_resubscribe_after_unsubscribe() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|returner", "Returner", "returner@test.com").await;

    for (value, expected) in [(false, false), (true, true)] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/v1/users/me/preferences")
                    .header("cookie", format!("skilldir_session={session}"))
                    .header("content-type", "application/json")
                    .body(Body::from(json!({ "weekly_digest": value }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["preferences"]["weekly_digest"].as_bool().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_preferences_require_session() {
    let state = create_test_state();
    let app = create_test_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/users/me/preferences")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
