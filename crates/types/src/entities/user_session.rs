use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use skilldir_const::auth::{SESSION_TOKEN_BYTES, SESSION_TTL_SECONDS};

/// A server-side login session
///
/// Created after a successful identity-provider login. The opaque token is
/// 32 random bytes, hex-encoded, and is the only value stored in the
/// session cookie; everything else lives server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSession {
    /// Unique session ID (Snowflake ID)
    pub id: i64,

    /// ID of the logged-in user
    pub user_id: i64,

    /// Opaque session token (64 hex chars)
    pub token: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session expires
    pub expires_at: DateTime<Utc>,

    /// When the session was revoked by logout (if at all)
    pub revoked_at: Option<DateTime<Utc>>,
}

impl UserSession {
    /// Create a new session with the default TTL
    pub fn new(id: i64, user_id: i64, token: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            token,
            created_at: now,
            expires_at: now + Duration::seconds(SESSION_TTL_SECONDS),
            revoked_at: None,
        }
    }

    /// Generate a cryptographically secure random session token
    ///
    /// Returns a 32-byte random value as a 64-character hex string.
    pub fn generate_token() -> String {
        use rand::Rng;
        let mut rng = rand::rng();
        let bytes: [u8; SESSION_TOKEN_BYTES] = rng.random();
        hex::encode(bytes)
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if the session is usable (not expired and not revoked)
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && self.revoked_at.is_none()
    }

    /// Revoke the session at the current time
    pub fn revoke(&mut self) {
        self.revoked_at = Some(Utc::now());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_format() {
        let token = UserSession::generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, UserSession::generate_token());
    }

    #[test]
    fn test_new_session_is_valid() {
        let session = UserSession::new(1, 42, UserSession::generate_token());
        assert!(session.is_valid());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_revoked_session_is_invalid() {
        let mut session = UserSession::new(1, 42, UserSession::generate_token());
        session.revoke();
        assert!(!session.is_valid());
    }
}
