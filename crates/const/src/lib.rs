//! # Skilldir Constants
//!
//! Zero-dependency crate containing constants used across the Skilldir
//! codebase.
//!
//! This crate centralizes:
//! - Authentication constants (session cookie, session TTL)
//! - Token duration constants (unsubscribe token window)
//! - Business limit constants (pagination, leaderboard, email batching)

pub mod auth;
pub mod limits;
pub mod tokens;

// Re-export commonly used constants at crate root
pub use auth::{SESSION_COOKIE_NAME, SESSION_TTL_SECONDS};
pub use limits::{
    DEFAULT_PAGE_LIMIT, EMAIL_BATCH_DELAY_MS, EMAIL_BATCH_SIZE, LEADERBOARD_DEFAULT_LIMIT,
    LEADERBOARD_MAX_LIMIT, MAX_PAGE_LIMIT,
};
pub use tokens::UNSUBSCRIBE_TOKEN_MAX_AGE_MS;
