use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email categories a user can opt out of
///
/// The wire name of each variant doubles as the `type` value carried in
/// unsubscribe links (`?token=...&type=marketing`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    /// Marketing and announcement mail
    Marketing,
    /// Product update mail
    ProductUpdates,
    /// The weekly digest of new and trending skills
    WeeklyDigest,
}

/// Per-user email notification preferences
///
/// One record per user, keyed by user ID. All categories default to enabled;
/// transactional mail (e.g. login notifications) is not covered here and
/// cannot be disabled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPreferences {
    /// ID of the user these preferences belong to
    pub user_id: i64,

    /// Marketing and announcement mail
    pub marketing: bool,

    /// Product update mail
    pub product_updates: bool,

    /// Weekly digest mail
    pub weekly_digest: bool,

    /// When the preferences were last changed
    pub updated_at: DateTime<Utc>,
}

impl NotificationPreferences {
    /// Default preferences for a new user: everything enabled
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            marketing: true,
            product_updates: true,
            weekly_digest: true,
            updated_at: Utc::now(),
        }
    }

    /// Whether the given category is enabled
    pub fn is_enabled(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Marketing => self.marketing,
            NotificationKind::ProductUpdates => self.product_updates,
            NotificationKind::WeeklyDigest => self.weekly_digest,
        }
    }

    /// Set a single category
    pub fn set(&mut self, kind: NotificationKind, enabled: bool) {
        match kind {
            NotificationKind::Marketing => self.marketing = enabled,
            NotificationKind::ProductUpdates => self.product_updates = enabled,
            NotificationKind::WeeklyDigest => self.weekly_digest = enabled,
        }
        self.updated_at = Utc::now();
    }

    /// Disable a single category (the unsubscribe path)
    pub fn unsubscribe(&mut self, kind: NotificationKind) {
        self.set(kind, false);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_all_enabled() {
        let prefs = NotificationPreferences::new(42);
        assert!(prefs.marketing);
        assert!(prefs.product_updates);
        assert!(prefs.weekly_digest);
    }

    #[test]
    fn test_unsubscribe_disables_only_named_kind() {
        let mut prefs = NotificationPreferences::new(42);
        prefs.unsubscribe(NotificationKind::Marketing);
        assert!(!prefs.is_enabled(NotificationKind::Marketing));
        assert!(prefs.is_enabled(NotificationKind::ProductUpdates));
        assert!(prefs.is_enabled(NotificationKind::WeeklyDigest));
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(NotificationKind::Marketing.to_string(), "marketing");
        assert_eq!(NotificationKind::WeeklyDigest.to_string(), "weekly_digest");
        assert_eq!(
            "product_updates".parse::<NotificationKind>().unwrap(),
            NotificationKind::ProductUpdates
        );
        assert!("newsletter".parse::<NotificationKind>().is_err());
    }
}
