//! Leaderboard handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use skilldir_const::limits::LEADERBOARD_DEFAULT_LIMIT;
use skilldir_types::dto::LeaderboardResponse;

use crate::handlers::auth::{AppState, Result};

/// Query parameters for the leaderboard endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    /// Number of entries to return (clamped server-side)
    pub limit: Option<usize>,
}

/// Top skills by install count
///
/// GET /v1/leaderboard?limit=25
///
/// Served from the ranking cache; results may lag new installs by up to
/// the cache TTL.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>> {
    let limit = params.limit.unwrap_or(LEADERBOARD_DEFAULT_LIMIT);
    let repos = state.repositories();
    let entries = state.leaderboard.top(&repos.skill, limit).await?;

    Ok(Json(LeaderboardResponse { entries }))
}
