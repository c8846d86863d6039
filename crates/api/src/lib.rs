//! # Skilldir API
//!
//! REST API handlers and routes for the Skilldir service.

#![deny(unsafe_code)]

use std::sync::Arc;

use skilldir_config::Config;
use skilldir_core::{EmailService, IdentityVerifier};
use skilldir_storage::Backend;
use tracing::info;

pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use middleware::SessionContext;
pub use pagination::{PaginationParams, PaginationQuery, ValidatedPagination};
pub use routes::create_router_with_state;
pub use skilldir_types::dto::ErrorResponse;

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        #[allow(clippy::expect_used)]
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        #[allow(clippy::expect_used)]
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM signal, initiating shutdown");
        }
    }
}

/// Start the Skilldir HTTP server
///
/// Blocks until shutdown (Ctrl+C or SIGTERM).
pub async fn serve(
    storage: Arc<Backend>,
    config: Arc<Config>,
    identity: Arc<IdentityVerifier>,
    email_service: Option<Arc<EmailService>>,
) -> std::io::Result<()> {
    let state = AppState::new(storage, config.clone(), identity, email_service);

    let router = routes::create_router_with_state(state);

    // Bind listener (address is already validated in config)
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;

    info!(listen = %config.listen, "Skilldir API listening");

    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await
}
