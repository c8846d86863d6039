//! # Skilldir Configuration
//!
//! CLI-first configuration for the Skilldir service. Uses `clap::Parser` for
//! argument parsing with environment variable fallbacks, and `bon::Builder`
//! for ergonomic test construction without CLI/env interference.
//!
//! ```no_run
//! use clap::Parser;
//! use skilldir_config::{Cli, Config};
//!
//! let cli = Cli::parse();
//! let config = cli.config;
//! config.validate().expect("invalid configuration");
//! ```
//!
//! ```no_run
//! use skilldir_config::{Config, StorageBackend};
//!
//! let config = Config::builder()
//!     .storage(StorageBackend::Memory)
//!     .unsubscribe_secret("test-secret")
//!     .build();
//! ```

#![deny(unsafe_code)]

use std::net::SocketAddr;

use bon::Builder;
use clap::Parser;
use skilldir_const::limits::{EMAIL_BATCH_DELAY_MS, EMAIL_BATCH_SIZE};
use skilldir_types::error::{Error, Result};

/// Default HTTP listen address.
const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Default public base URL for pages and email links.
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Default log level filter string.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default email from address.
const DEFAULT_EMAIL_FROM_ADDRESS: &str = "noreply@skilldir.dev";

/// Default email from display name.
const DEFAULT_EMAIL_FROM_NAME: &str = "Skilldir";

/// Default SMTP port.
const DEFAULT_EMAIL_PORT: u16 = 587;

/// Default leaderboard cache TTL in seconds.
const DEFAULT_LEADERBOARD_CACHE_TTL_SECS: u64 = 60;

/// Default leaderboard cache capacity (distinct limit values).
const DEFAULT_LEADERBOARD_CACHE_ENTRIES: u64 = 128;

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory storage (data lost on restart).
    #[default]
    Memory,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Automatically detect: JSON for non-TTY stdout, text otherwise.
    #[default]
    Auto,
    /// JSON structured logging (recommended for production).
    Json,
    /// Human-readable text format.
    Text,
}

/// Command-line interface for the Skilldir service.
#[derive(Debug, Parser)]
#[command(name = "skilldir")]
#[command(version)]
pub struct Cli {
    /// Server configuration (flattened so flags appear at top level).
    #[command(flatten)]
    pub config: Config,
}

/// Configuration for the Skilldir service.
///
/// All fields are configurable via CLI flags or environment variables.
/// Precedence: CLI arg > env var > default value.
///
/// Sensitive fields (secrets, SMTP password) use `hide_env_values` to
/// prevent leaking secrets in `--help` output.
#[derive(Debug, Clone, Builder, Parser)]
#[command(name = "skilldir")]
#[command(version)]
#[builder(on(String, into))]
pub struct Config {
    // ── Server ───────────────────────────────────────────────────────
    /// HTTP bind address.
    #[arg(long = "listen", env = "SKILLDIR__LISTEN", default_value = DEFAULT_LISTEN)]
    #[builder(default = default_listen())]
    pub listen: SocketAddr,

    /// Tracing-subscriber filter string (e.g., info, debug, trace).
    #[arg(long = "log-level", env = "SKILLDIR__LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    #[builder(default = DEFAULT_LOG_LEVEL.to_string())]
    pub log_level: String,

    /// Log output format: auto, json, or text.
    #[arg(long = "log-format", env = "SKILLDIR__LOG_FORMAT", value_enum, default_value = "auto")]
    #[builder(default)]
    pub log_format: LogFormat,

    // ── Storage ──────────────────────────────────────────────────────
    /// Storage backend.
    #[arg(long = "storage", env = "SKILLDIR__STORAGE", value_enum, default_value = "memory")]
    #[builder(default)]
    pub storage: StorageBackend,

    // ── Public site ──────────────────────────────────────────────────
    /// Public base URL used in the sitemap, JSON-LD and email links.
    #[arg(long = "public-url", env = "SKILLDIR__PUBLIC_URL", default_value = DEFAULT_PUBLIC_URL)]
    #[builder(default = DEFAULT_PUBLIC_URL.to_string())]
    pub public_url: String,

    // ── Secrets ──────────────────────────────────────────────────────
    /// Secret for signing unsubscribe tokens. Falls back to
    /// --session-secret when unset; token issuance fails when neither is
    /// configured.
    #[arg(
        long = "unsubscribe-secret",
        env = "SKILLDIR__UNSUBSCRIBE_SECRET",
        hide_env_values = true
    )]
    pub unsubscribe_secret: Option<String>,

    /// Shared application secret, also the fallback signing key for
    /// unsubscribe tokens.
    #[arg(long = "session-secret", env = "SKILLDIR__SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<String>,

    // ── Identity provider ────────────────────────────────────────────
    /// Expected issuer of identity-provider ID tokens.
    #[arg(long = "idp-issuer", env = "SKILLDIR__IDP_ISSUER")]
    pub idp_issuer: Option<String>,

    /// Expected audience of identity-provider ID tokens.
    #[arg(long = "idp-audience", env = "SKILLDIR__IDP_AUDIENCE")]
    pub idp_audience: Option<String>,

    /// Shared secret for verifying identity-provider ID tokens (HS256).
    #[arg(long = "idp-secret", env = "SKILLDIR__IDP_SECRET", hide_env_values = true)]
    pub idp_secret: Option<String>,

    // ── Email (SMTP) ─────────────────────────────────────────────────
    /// SMTP host. Empty string disables email.
    #[arg(long = "email-host", env = "SKILLDIR__EMAIL_HOST", default_value = "")]
    #[builder(default)]
    pub email_host: String,

    /// SMTP port.
    #[arg(long = "email-port", env = "SKILLDIR__EMAIL_PORT", default_value_t = DEFAULT_EMAIL_PORT)]
    #[builder(default = DEFAULT_EMAIL_PORT)]
    pub email_port: u16,

    /// SMTP username.
    #[arg(long = "email-username", env = "SKILLDIR__EMAIL_USERNAME")]
    pub email_username: Option<String>,

    /// SMTP password.
    #[arg(long = "email-password", env = "SKILLDIR__EMAIL_PASSWORD", hide_env_values = true)]
    pub email_password: Option<String>,

    /// From email address for outgoing messages.
    #[arg(long = "email-from-address", env = "SKILLDIR__EMAIL_FROM_ADDRESS", default_value = DEFAULT_EMAIL_FROM_ADDRESS)]
    #[builder(default = DEFAULT_EMAIL_FROM_ADDRESS.to_string())]
    pub email_from_address: String,

    /// From display name for outgoing messages.
    #[arg(long = "email-from-name", env = "SKILLDIR__EMAIL_FROM_NAME", default_value = DEFAULT_EMAIL_FROM_NAME)]
    #[builder(default = DEFAULT_EMAIL_FROM_NAME.to_string())]
    pub email_from_name: String,

    /// Allow insecure (unencrypted) SMTP connections.
    /// Only for local development with tools like Mailpit.
    #[arg(long = "email-insecure", env = "SKILLDIR__EMAIL_INSECURE")]
    #[builder(default)]
    pub email_insecure: bool,

    /// Recipients per campaign batch.
    #[arg(long = "email-batch-size", env = "SKILLDIR__EMAIL_BATCH_SIZE", default_value_t = EMAIL_BATCH_SIZE)]
    #[builder(default = EMAIL_BATCH_SIZE)]
    pub email_batch_size: usize,

    /// Fixed delay between campaign batches, in milliseconds.
    #[arg(long = "email-batch-delay-ms", env = "SKILLDIR__EMAIL_BATCH_DELAY_MS", default_value_t = EMAIL_BATCH_DELAY_MS)]
    #[builder(default = EMAIL_BATCH_DELAY_MS)]
    pub email_batch_delay_ms: u64,

    // ── Leaderboard cache ────────────────────────────────────────────
    /// Leaderboard cache TTL in seconds.
    #[arg(long = "leaderboard-cache-ttl-secs", env = "SKILLDIR__LEADERBOARD_CACHE_TTL_SECS", default_value_t = DEFAULT_LEADERBOARD_CACHE_TTL_SECS)]
    #[builder(default = DEFAULT_LEADERBOARD_CACHE_TTL_SECS)]
    pub leaderboard_cache_ttl_secs: u64,

    /// Leaderboard cache capacity.
    #[arg(long = "leaderboard-cache-entries", env = "SKILLDIR__LEADERBOARD_CACHE_ENTRIES", default_value_t = DEFAULT_LEADERBOARD_CACHE_ENTRIES)]
    #[builder(default = DEFAULT_LEADERBOARD_CACHE_ENTRIES)]
    pub leaderboard_cache_entries: u64,

    // ── Mode Flags ───────────────────────────────────────────────────
    /// Force development mode.
    /// No environment variable; this must be an explicit CLI choice.
    #[arg(long = "dev-mode")]
    #[builder(default)]
    pub dev_mode: bool,
}

fn default_listen() -> SocketAddr {
    #[allow(clippy::expect_used)]
    DEFAULT_LISTEN.parse().expect("valid default listen address")
}

impl Config {
    /// Validate cross-field business rules.
    ///
    /// Must be called after parsing and before using the config.
    pub fn validate(&self) -> Result<()> {
        // Validate public URL format
        if !self.public_url.starts_with("http://") && !self.public_url.starts_with("https://") {
            return Err(Error::config("--public-url must start with http:// or https://"));
        }

        if self.public_url.ends_with('/') {
            return Err(Error::config("--public-url must not end with a trailing slash"));
        }

        if !self.dev_mode
            && (self.public_url.contains("localhost") || self.public_url.contains("127.0.0.1"))
        {
            tracing::warn!(
                "--public-url contains localhost; this should only be used in development"
            );
        }

        // Configured-but-empty secrets are almost certainly a deployment
        // mistake; fail fast rather than signing with an empty key.
        if self.unsubscribe_secret.as_deref() == Some("") {
            return Err(Error::config("--unsubscribe-secret must not be empty when set"));
        }
        if self.session_secret.as_deref() == Some("") {
            return Err(Error::config("--session-secret must not be empty when set"));
        }

        if self.email_batch_size == 0 {
            return Err(Error::config("--email-batch-size must be at least 1"));
        }

        // Identity provider settings come as a unit
        let idp_fields =
            [&self.idp_issuer, &self.idp_audience, &self.idp_secret].iter().filter(|f| f.is_some()).count();
        if idp_fields != 0 && idp_fields != 3 {
            return Err(Error::config(
                "--idp-issuer, --idp-audience and --idp-secret must be provided together",
            ));
        }

        Ok(())
    }

    /// Returns whether email sending is enabled.
    ///
    /// Email is disabled when `email_host` is empty (the default).
    pub fn is_email_enabled(&self) -> bool {
        !self.email_host.is_empty()
    }

    /// Returns whether identity-provider login is configured.
    pub fn is_idp_enabled(&self) -> bool {
        self.idp_secret.is_some()
    }

    /// Returns whether dev-mode is enabled.
    pub fn is_dev_mode(&self) -> bool {
        self.dev_mode
    }
}
