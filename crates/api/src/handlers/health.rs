//! Health check handlers.
//!
//! Follow Kubernetes API server conventions (`/livez`, `/readyz`,
//! `/healthz`).

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use skilldir_storage::StorageBackend;

use crate::handlers::auth::AppState;

/// Liveness probe: the process is up
///
/// GET /livez
pub async fn livez_handler() -> &'static str {
    "ok"
}

/// Readiness probe: storage answers reads
///
/// GET /readyz
pub async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.storage.get(b"healthz:probe").await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!(error = %e, "Readiness probe failed against storage");
            (StatusCode::SERVICE_UNAVAILABLE, "storage unavailable")
        },
    }
}

/// Combined health report
///
/// GET /healthz
pub async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let storage_ok = state.storage.get(b"healthz:probe").await.is_ok();
    let status = if storage_ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status,
        Json(json!({
            "status": if storage_ok { "ok" } else { "degraded" },
            "checks": { "storage": storage_ok },
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
