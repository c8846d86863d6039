//! Sitemap and robots handlers.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use skilldir_core::seo;

use crate::handlers::auth::{AppState, Result};

/// XML sitemap of all live skill pages
///
/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> Result<Response> {
    let skills = state.repositories().skill.list_active().await?;
    let xml = seo::sitemap_xml(&state.config.public_url, &skills);

    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

/// robots.txt with a sitemap pointer
///
/// GET /robots.txt
pub async fn robots(State(state): State<AppState>) -> Response {
    let body = seo::robots_txt(&state.config.public_url);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
