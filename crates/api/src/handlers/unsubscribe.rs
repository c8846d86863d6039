//! One-click unsubscribe endpoint.

use axum::{Json, extract::State};
use skilldir_types::{
    Error as CoreError,
    dto::{UnsubscribeRequest, UnsubscribeResponse},
    entities::NotificationKind,
};

use crate::handlers::auth::{AppState, Result};

/// Uniform rejection for every failed unsubscribe attempt
///
/// Malformed tokens, forged signatures, expired tokens, unknown users and
/// unknown categories all map to this one message, so the public endpoint
/// cannot be probed to learn which check failed.
fn invalid_link() -> CoreError {
    CoreError::validation("Invalid or expired unsubscribe link")
}

/// Disable one notification category via an emailed token
///
/// POST /v1/unsubscribe
///
/// Public endpoint: the signed token in the request body is the sole
/// authorization. Returns 200 on success, 400 with a generic message
/// otherwise.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(payload): Json<UnsubscribeRequest>,
) -> Result<Json<UnsubscribeResponse>> {
    let kind: NotificationKind = payload.kind.parse().map_err(|_| invalid_link())?;

    let claims = state.unsubscribe_tokens.verify(&payload.token).ok_or_else(invalid_link)?;

    let user_id: i64 = claims.user_id.parse().map_err(|_| invalid_link())?;

    let repos = state.repositories();
    let user = repos.user.get(user_id).await?.filter(|u| u.is_active()).ok_or_else(invalid_link)?;

    let mut prefs = repos.preferences.get_or_default(user.id).await?;
    prefs.unsubscribe(kind);
    repos.preferences.upsert(prefs).await?;

    tracing::info!(user_id = user.id, kind = %kind, "Unsubscribed via emailed link");
    Ok(Json(UnsubscribeResponse { message: format!("Unsubscribed from {kind}") }))
}
