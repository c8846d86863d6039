//! Unsubscribe token constants.

/// Maximum accepted age of an unsubscribe token, in milliseconds (30 days).
///
/// A token whose age is exactly this value is still accepted; only tokens
/// strictly older are rejected. The bound is checked against the issuance
/// timestamp embedded in the token payload.
pub const UNSUBSCRIBE_TOKEN_MAX_AGE_MS: i64 = 30 * 24 * 60 * 60 * 1000;
