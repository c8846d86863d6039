use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    handlers::{AppState, auth, health, leaderboard, preferences, seo, skills, unsubscribe},
    middleware::logging_middleware,
};

/// Create router with state and middleware applied
///
/// Authentication is enforced per handler through the `SessionContext`
/// extractor, so public and login-required methods can share a path
/// (e.g. `GET /v1/skills` is public while `POST /v1/skills` is not).
pub fn create_router_with_state(state: AppState) -> axum::Router {
    Router::new()
        // Health check endpoints (no authentication)
        // Follow Kubernetes API server conventions (/livez, /readyz, /healthz)
        .route("/livez", get(health::livez_handler))
        .route("/readyz", get(health::readyz_handler))
        .route("/healthz", get(health::healthz_handler))
        // SEO artifacts
        .route("/sitemap.xml", get(seo::sitemap))
        .route("/robots.txt", get(seo::robots))
        // Authentication endpoints
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/logout", post(auth::logout))
        // Current-user endpoints (session required)
        .route("/v1/users/me", get(auth::get_profile).patch(auth::update_profile))
        .route(
            "/v1/users/me/preferences",
            get(preferences::get_preferences).patch(preferences::update_preferences),
        )
        // Skill catalog (list/detail/install public; mutations author-only)
        .route("/v1/skills", get(skills::list_skills).post(skills::create_skill))
        .route(
            "/v1/skills/{slug}",
            get(skills::get_skill).patch(skills::update_skill).delete(skills::delete_skill),
        )
        .route("/v1/skills/{slug}/install", post(skills::install_skill))
        // Leaderboard
        .route("/v1/leaderboard", get(leaderboard::get_leaderboard))
        // One-click unsubscribe (token-authorized, no session)
        .route("/v1/unsubscribe", post(unsubscribe::unsubscribe))
        .with_state(state)
        // Add logging middleware to log all requests
        .layer(middleware::from_fn(logging_middleware))
}
