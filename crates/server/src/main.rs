use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use skilldir_config::{Cli, LogFormat};
use skilldir_core::{EmailService, IdGenerator, IdentityVerifier, SmtpEmailService, logging};
use skilldir_storage::Backend;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config;

    config.validate()?;

    // Initialize structured logging
    let log_config = logging::LogConfig {
        format: match config.log_format {
            LogFormat::Json => logging::LogFormat::Json,
            LogFormat::Text => logging::LogFormat::Full,
            LogFormat::Auto => {
                if std::io::IsTerminal::is_terminal(&std::io::stdout()) {
                    logging::LogFormat::Full
                } else {
                    logging::LogFormat::Json
                }
            },
        },
        filter: Some(config.log_level.clone()),
        ..Default::default()
    };

    if let Err(e) = logging::init_logging(log_config) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Skilldir");

    if config.is_dev_mode() {
        tracing::info!("Development mode enabled via --dev-mode flag");
    }

    // Storage backend (memory is the only backend today)
    let storage = Arc::new(Backend::memory());
    tracing::info!(storage = %config.storage, "Storage initialized");

    // Single-instance deployment: worker 0
    IdGenerator::init(0).map_err(|e| anyhow::anyhow!("Failed to initialize ID generator: {e}"))?;

    // Identity provider verifier (explicit dependency, built once here)
    let identity = if config.is_idp_enabled() {
        // validate() guarantees the three fields come as a unit
        #[allow(clippy::expect_used)]
        let verifier = IdentityVerifier::new(
            config.idp_issuer.as_deref().expect("validated"),
            config.idp_audience.as_deref().expect("validated"),
            config.idp_secret.as_deref().expect("validated"),
        );
        tracing::info!(issuer = config.idp_issuer.as_deref(), "Identity provider configured");
        Arc::new(verifier)
    } else {
        tracing::warn!("No identity provider configured - logins will be rejected");
        Arc::new(IdentityVerifier::disabled())
    };

    // Email service (if configured)
    let email_service = if config.is_email_enabled() {
        match SmtpEmailService::new(
            &config.email_host,
            config.email_port,
            config.email_username.as_deref().unwrap_or_default(),
            config.email_password.as_deref().unwrap_or_default(),
            config.email_from_address.clone(),
            config.email_from_name.clone(),
            config.email_insecure,
        ) {
            Ok(smtp_service) => {
                tracing::info!(
                    host = %config.email_host,
                    port = config.email_port,
                    insecure = config.email_insecure,
                    "Email service initialized"
                );
                Some(Arc::new(EmailService::new(Box::new(smtp_service))))
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to initialize email service - emails will be disabled");
                None
            },
        }
    } else {
        tracing::info!("Email service not configured - outbound mail disabled");
        None
    };

    if config.unsubscribe_secret.is_none() && config.session_secret.is_none() {
        tracing::warn!(
            "No unsubscribe or session secret configured - unsubscribe token issuance will fail"
        );
    }

    let config = Arc::new(config);
    skilldir_api::serve(storage, config, identity, email_service).await?;

    tracing::info!("Skilldir shut down cleanly");
    Ok(())
}
