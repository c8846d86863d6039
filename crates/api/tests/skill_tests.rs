#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Integration tests for the skill catalog: publish, list, detail,
//! update, delete, and install counting.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use skilldir_test_fixtures::{
    body_json, create_test_app, create_test_state, install_skill, login_user, publish_skill,
};
use tower::ServiceExt;

#[tokio::test]
async fn test_publish_and_fetch_detail() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|author", "Author", "author@test.com").await;
    let created = publish_skill(&app, &session, "flaky-test-hunter", "Flaky Test Hunter").await;
    assert_eq!(created["skill"]["slug"], "flaky-test-hunter");
    assert_eq!(created["skill"]["install_count"], 0);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/skills/flaky-test-hunter")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["skill"]["name"], "Flaky Test Hunter");
    // Detail pages carry JSON-LD structured data
    assert_eq!(json["structured_data"]["@type"], "SoftwareApplication");
    assert_eq!(
        json["structured_data"]["url"],
        "https://skilldir.test/skills/flaky-test-hunter"
    );
}

#[tokio::test]
async fn test_publish_requires_login() {
    let state = create_test_state();
    let app = create_test_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/skills")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "slug": "anon-skill",
                        "name": "Anon",
                        "summary": "s",
                        "description": "d",
                        "category": "other"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_slug_is_conflict() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|author", "Author", "author@test.com").await;
    publish_skill(&app, &session, "taken-slug", "First").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/skills")
                .header("cookie", format!("skilldir_session={session}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "slug": "taken-slug",
                        "name": "Second",
                        "summary": "s",
                        "description": "d",
                        "category": "other"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_invalid_slug_is_rejected() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|author", "Author", "author@test.com").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/skills")
                .header("cookie", format!("skilldir_session={session}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "slug": "Not A Slug",
                        "name": "Bad",
                        "summary": "s",
                        "description": "d",
                        "category": "other"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_paginates_newest_first() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|author", "Author", "author@test.com").await;
    for i in 1..=5 {
        publish_skill(&app, &session, &format!("skill-{i}"), &format!("Skill {i}")).await;
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/skills?limit=2&offset=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let slugs: Vec<&str> =
        json["skills"].as_array().unwrap().iter().map(|s| s["slug"].as_str().unwrap()).collect();
    assert_eq!(slugs, vec!["skill-5", "skill-4"], "Newest first");

    assert_eq!(json["pagination"]["total"], 5);
    assert_eq!(json["pagination"]["count"], 2);
    assert!(json["pagination"]["has_more"].as_bool().unwrap());

    // Listing carries ItemList structured data for the page
    assert_eq!(json["structured_data"]["@type"], "ItemList");
    assert_eq!(json["structured_data"]["itemListElement"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_only_author_can_update_or_delete() {
    let state = create_test_state();
    let app = create_test_app(state);

    let author = login_user(&app, "idp|author", "Author", "author@test.com").await;
    let other = login_user(&app, "idp|other", "Other", "other@test.com").await;
    publish_skill(&app, &author, "guarded", "Guarded").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/v1/skills/guarded")
                .header("cookie", format!("skilldir_session={other}"))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "name": "Hijacked" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/skills/guarded")
                .header("cookie", format!("skilldir_session={other}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The author can update
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/v1/skills/guarded")
                .header("cookie", format!("skilldir_session={author}"))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "summary": "Updated summary" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["skill"]["summary"], "Updated summary");
}

#[tokio::test]
async fn test_delete_removes_from_listing_and_detail() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|author", "Author", "author@test.com").await;
    publish_skill(&app, &session, "doomed", "Doomed").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/skills/doomed")
                .header("cookie", format!("skilldir_session={session}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder().method("GET").uri("/v1/skills/doomed").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(Request::builder().method("GET").uri("/v1/skills").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_install_increments_count_without_login() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|author", "Author", "author@test.com").await;
    publish_skill(&app, &session, "installable", "Installable").await;

    install_skill(&app, "installable").await;
    install_skill(&app, "installable").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/skills/installable")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["skill"]["install_count"], 2);
}

#[tokio::test]
async fn test_install_unknown_slug_is_not_found() {
    let state = create_test_state();
    let app = create_test_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/skills/no-such-skill/install")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
