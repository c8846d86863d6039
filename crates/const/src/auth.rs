//! Authentication constants for session management.

/// Session cookie name used for user authentication.
///
/// Must be consistent across all API handlers that read/write session state.
pub const SESSION_COOKIE_NAME: &str = "skilldir_session";

/// Session lifetime in seconds (7 days).
///
/// After this duration the stored session expires and users must log in
/// again through the identity provider.
pub const SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Length of the raw session token in bytes (hex-encoded to 64 chars).
pub const SESSION_TOKEN_BYTES: usize = 32;
