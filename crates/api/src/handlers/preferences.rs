//! Notification preference handlers.

use axum::{Json, extract::State};
use skilldir_types::{
    dto::{PreferencesInfo, PreferencesResponse, UpdatePreferencesRequest},
    entities::NotificationPreferences,
};

use crate::{
    handlers::auth::{AppState, Result},
    middleware::SessionContext,
};

fn prefs_to_info(prefs: &NotificationPreferences) -> PreferencesInfo {
    PreferencesInfo {
        marketing: prefs.marketing,
        product_updates: prefs.product_updates,
        weekly_digest: prefs.weekly_digest,
        updated_at: prefs.updated_at.to_rfc3339(),
    }
}

/// Get the current user's notification preferences
///
/// GET /v1/users/me/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<PreferencesResponse>> {
    let prefs = state.repositories().preferences.get_or_default(session.user.id).await?;
    Ok(Json(PreferencesResponse { preferences: prefs_to_info(&prefs) }))
}

/// Update the current user's notification preferences
///
/// PATCH /v1/users/me/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    session: SessionContext,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> Result<Json<PreferencesResponse>> {
    let repos = state.repositories();
    let mut prefs = repos.preferences.get_or_default(session.user.id).await?;

    if let Some(marketing) = payload.marketing {
        prefs.marketing = marketing;
    }
    if let Some(product_updates) = payload.product_updates {
        prefs.product_updates = product_updates;
    }
    if let Some(weekly_digest) = payload.weekly_digest {
        prefs.weekly_digest = weekly_digest;
    }
    prefs.updated_at = chrono::Utc::now();

    repos.preferences.upsert(prefs.clone()).await?;
    Ok(Json(PreferencesResponse { preferences: prefs_to_info(&prefs) }))
}
