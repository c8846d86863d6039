use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum display name length
const MAX_NAME_LENGTH: usize = 100;

/// A registered account
///
/// Accounts are provisioned on first login through the identity provider;
/// the provider's stable subject identifier links logins to the same record.
/// No credentials are stored locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique user ID (Snowflake ID)
    pub id: i64,

    /// Stable subject identifier assigned by the identity provider
    pub provider_subject: String,

    /// Display name
    pub name: String,

    /// Primary email address, used for notification delivery
    pub email: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was soft-deleted (if at all)
    pub deleted_at: Option<DateTime<Utc>>,
}

#[bon::bon]
impl User {
    /// Create a new user
    ///
    /// Validates the display name and email before constructing the record.
    #[builder(on(String, into), finish_fn = create)]
    pub fn new(id: i64, provider_subject: String, name: String, email: String) -> Result<Self> {
        validate_name(&name)?;
        validate_email(&email)?;
        if provider_subject.is_empty() {
            return Err(Error::validation("Identity provider subject must not be empty"));
        }

        Ok(Self {
            id,
            provider_subject,
            name,
            email,
            created_at: Utc::now(),
            deleted_at: None,
        })
    }

    /// Update the display name
    pub fn set_name(&mut self, name: String) -> Result<()> {
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Update the email address
    pub fn set_email(&mut self, email: String) -> Result<()> {
        validate_email(&email)?;
        self.email = email;
        Ok(())
    }

    /// Mark the account as deleted at the current time
    pub fn mark_deleted(&mut self) {
        self.deleted_at = Some(Utc::now());
    }

    /// Whether the account is active (not soft-deleted)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Validates a display name: non-empty after trimming, bounded length
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Name must not be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::validation(format!(
            "Name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Minimal structural email check: one `@` with non-empty local and domain
/// parts. Deliverability is the email provider's problem.
fn validate_email(email: &str) -> Result<()> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(Error::validation("Invalid email address"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::builder()
            .id(1)
            .provider_subject("auth0|abc123")
            .name("Alice")
            .email("alice@example.com")
            .create()
            .unwrap()
    }

    #[test]
    fn test_new_user() {
        let user = test_user();
        assert_eq!(user.id, 1);
        assert_eq!(user.provider_subject, "auth0|abc123");
        assert!(user.is_active());
    }

    #[test]
    fn test_rejects_empty_name() {
        let result =
            User::builder().id(1).provider_subject("s").name("  ").email("a@b.io").create();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_subject() {
        let result = User::builder().id(1).provider_subject("").name("A").email("a@b.io").create();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_malformed_email() {
        for email in ["", "no-at-sign", "@no-local.com", "local@", "local@nodot"] {
            let result =
                User::builder().id(1).provider_subject("s").name("A").email(email).create();
            assert!(result.is_err(), "{email:?} should be rejected");
        }
    }

    #[test]
    fn test_mark_deleted() {
        let mut user = test_user();
        user.mark_deleted();
        assert!(!user.is_active());
        assert!(user.deleted_at.is_some());
    }
}
