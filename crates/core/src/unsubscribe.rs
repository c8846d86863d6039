//! Signed, time-limited unsubscribe tokens.
//!
//! Marketing email embeds a token in its unsubscribe links so recipients can
//! opt out with one click, without logging in. Tokens are self-contained:
//! `base64url(payload) "." base64url(HMAC-SHA256(secret, payload))` with the
//! payload `"{user_id}:{issued_at_millis}"`. Nothing is persisted per token,
//! so the only revocation mechanism before natural expiry is rotating the
//! signing secret, which invalidates every outstanding token at once.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use skilldir_const::tokens::UNSUBSCRIBE_TOKEN_MAX_AGE_MS;
use skilldir_types::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Identity recovered from a valid unsubscribe token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsubscribeClaims {
    /// The user id the token was issued for
    pub user_id: String,
    /// Issuance time in milliseconds since the Unix epoch
    pub issued_at_millis: i64,
}

/// Issues and verifies unsubscribe tokens
///
/// Holds the configured signing secrets; constructed once at startup and
/// passed to handlers and email templating explicitly. Secret selection
/// happens per call: the dedicated unsubscribe secret when set, otherwise
/// the shared session secret. Issuance fails when neither is configured.
///
/// The payload splits on the LAST `:`, so user ids containing `:` still
/// round-trip; the timestamp is always the suffix after the final colon.
/// Whether user ids should be constrained to a colon-free alphabet instead
/// is an open design question; the split-last behavior is kept as-is.
#[derive(Debug, Clone)]
pub struct UnsubscribeTokens {
    primary_secret: Option<String>,
    fallback_secret: Option<String>,
}

impl UnsubscribeTokens {
    /// Create a token service from the configured secrets
    ///
    /// `primary_secret` is the dedicated unsubscribe signing secret;
    /// `fallback_secret` is the shared application secret used when the
    /// dedicated one is unset.
    pub fn new(primary_secret: Option<String>, fallback_secret: Option<String>) -> Self {
        Self { primary_secret, fallback_secret }
    }

    /// Resolve the signing secret for this call
    fn secret(&self) -> Result<&[u8]> {
        self.primary_secret
            .as_deref()
            .or(self.fallback_secret.as_deref())
            .map(str::as_bytes)
            .ok_or_else(|| {
                Error::config(
                    "No unsubscribe token secret configured \
                     (set --unsubscribe-secret or --session-secret)",
                )
            })
    }

    /// Issue a token for `user_id` at the current wall-clock time
    ///
    /// Pure apart from the clock read; the only failure is a configuration
    /// error when no signing secret is available.
    pub fn generate(&self, user_id: &str) -> Result<String> {
        self.generate_at(user_id, Utc::now().timestamp_millis())
    }

    fn generate_at(&self, user_id: &str, now_millis: i64) -> Result<String> {
        let secret = self.secret()?;
        let payload = format!("{user_id}:{now_millis}");

        let mut mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| Error::internal(format!("Failed to initialize HMAC: {e}")))?;
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify a token received from a public endpoint
    ///
    /// Returns the embedded claims only when the token is well-formed, the
    /// signature matches, and the token is at most 30 days old (inclusive).
    /// Every failure maps to `None`, whether the token was malformed,
    /// forged, expired, or no secret is configured; callers cannot tell
    /// which check failed, which keeps the public endpoint from acting as
    /// a validity oracle. This function never errors.
    pub fn verify(&self, token: &str) -> Option<UnsubscribeClaims> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    fn verify_at(&self, token: &str, now_millis: i64) -> Option<UnsubscribeClaims> {
        let secret = self.secret().ok()?;

        // Exactly two non-empty dot-separated segments
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 2 {
            return None;
        }
        let (encoded_payload, encoded_signature) = (parts[0], parts[1]);
        if encoded_payload.is_empty() || encoded_signature.is_empty() {
            return None;
        }

        let payload_bytes = URL_SAFE_NO_PAD.decode(encoded_payload).ok()?;
        let payload = String::from_utf8(payload_bytes).ok()?;

        // Timestamp is the suffix after the LAST colon; the user id (which
        // may itself contain colons) is everything before it.
        let (user_id, timestamp) = payload.rsplit_once(':')?;
        let issued_at_millis: i64 = timestamp.parse().ok()?;

        // Recompute the signature fresh and compare. verify_slice rejects
        // length mismatches up front and compares the rest in constant
        // time, so the check leaks nothing about where a forgery differs.
        let provided_signature = URL_SAFE_NO_PAD.decode(encoded_signature).ok()?;
        let mut mac = HmacSha256::new_from_slice(secret).ok()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&provided_signature).ok()?;

        // Upper age bound only. A timestamp in the future yields a negative
        // age and passes; rejecting future-dated tokens would change
        // observable behavior and is left as an open question.
        if now_millis - issued_at_millis > UNSUBSCRIBE_TOKEN_MAX_AGE_MS {
            return None;
        }

        Some(UnsubscribeClaims { user_id: user_id.to_string(), issued_at_millis })
    }
}
