#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Integration tests for SEO artifacts: sitemap, robots.txt and the
//! health endpoints that crawler infrastructure probes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use skilldir_test_fixtures::{create_test_app, create_test_state, login_user, publish_skill};
use tower::ServiceExt;

async fn get_text(app: &axum::Router, uri: &str) -> (StatusCode, String, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_sitemap_lists_published_skills() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|author", "Author", "author@test.com").await;
    publish_skill(&app, &session, "mapped-skill", "Mapped").await;

    let (status, content_type, body) = get_text(&app, "/sitemap.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/xml");
    assert!(body.contains("<loc>https://skilldir.test/skills/mapped-skill</loc>"));
    assert!(body.contains("<loc>https://skilldir.test/skills</loc>"));
}

#[tokio::test]
async fn test_sitemap_drops_deleted_skills() {
    let state = create_test_state();
    let app = create_test_app(state);

    let session = login_user(&app, "idp|author", "Author", "author@test.com").await;
    publish_skill(&app, &session, "ephemeral", "Ephemeral").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/skills/ephemeral")
                .header("cookie", format!("skilldir_session={session}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, _, body) = get_text(&app, "/sitemap.xml").await;
    assert!(!body.contains("ephemeral"));
}

#[tokio::test]
async fn test_robots_txt() {
    let state = create_test_state();
    let app = create_test_app(state);

    let (status, content_type, body) = get_text(&app, "/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    assert!(body.contains("User-agent: *"));
    assert!(body.contains("Sitemap: https://skilldir.test/sitemap.xml"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let state = create_test_state();
    let app = create_test_app(state);

    for uri in ["/livez", "/readyz", "/healthz"] {
        let response = app
            .clone()
            .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri} should be healthy");
    }
}
