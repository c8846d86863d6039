//! Identity-provider token verification.
//!
//! Login is delegated to an external identity provider; the client obtains
//! a signed ID token and posts it to `/v1/auth/login`. This module verifies
//! that token (HS256 shared secret, required issuer and audience) and
//! extracts the subject identity. The verifier is constructed once at
//! startup and injected into application state rather than materialized
//! lazily on first use.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use skilldir_types::error::{Error, Result};

/// Claims extracted from an identity-provider ID token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Issuer
    pub iss: String,
    /// Stable subject identifier for the end user
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// End user's email address
    pub email: String,
    /// End user's display name
    pub name: String,
}

/// Verifies identity-provider ID tokens
pub struct IdentityVerifier {
    inner: Option<Inner>,
}

struct Inner {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    /// Create a verifier for the configured provider
    pub fn new(issuer: &str, audience: &str, secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Self {
            inner: Some(Inner {
                decoding_key: DecodingKey::from_secret(secret.as_bytes()),
                validation,
            }),
        }
    }

    /// Create a verifier that rejects every login
    ///
    /// Used when no identity provider is configured; login attempts fail
    /// with a configuration error instead of panicking at startup.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Verify an ID token and extract its claims
    ///
    /// Signature, expiry, issuer and audience are all checked; any failure
    /// maps to a single authentication error so the response does not leak
    /// which check failed.
    pub fn verify(&self, id_token: &str) -> Result<IdentityClaims> {
        let Some(inner) = &self.inner else {
            return Err(Error::config("Identity provider is not configured"));
        };

        let token_data = decode::<IdentityClaims>(id_token, &inner.decoding_key, &inner.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "ID token verification failed");
                Error::auth("Invalid identity token")
            })?;

        if token_data.claims.sub.is_empty() {
            return Err(Error::auth("Invalid identity token"));
        }

        Ok(token_data.claims)
    }
}
