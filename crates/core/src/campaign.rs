//! Marketing email campaigns.
//!
//! Campaign sends are sequential and batched: recipients are enumerated
//! once, filtered by their notification preferences, and mailed in
//! fixed-size batches with a fixed delay between batches to stay under
//! provider rate limits. A failed send skips that recipient and continues;
//! only a missing unsubscribe-token secret aborts the whole campaign, since
//! no compliant marketing mail can be produced without working unsubscribe
//! links.

use std::{sync::Arc, time::Duration};

use skilldir_storage::StorageBackend;
use skilldir_types::{
    entities::{NotificationKind, User},
    error::Result,
};

use crate::{
    email::{
        AnnouncementEmailTemplate, DigestItem, EmailService, EmailTemplate,
        WeeklyDigestEmailTemplate, unsubscribe_url,
    },
    repository::{NotificationPreferencesRepository, UserRepository},
    unsubscribe::UnsubscribeTokens,
};

/// Outcome counts for one campaign run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignStats {
    /// Messages handed to the email service
    pub sent: usize,
    /// Recipients skipped because the category is disabled for them
    pub skipped: usize,
    /// Sends that failed and were dropped
    pub failed: usize,
    /// Number of batches dispatched
    pub batches: usize,
}

/// Sends marketing mail to opted-in users
pub struct CampaignSender {
    email: Arc<EmailService>,
    tokens: UnsubscribeTokens,
    public_url: String,
    batch_size: usize,
    batch_delay: Duration,
}

impl CampaignSender {
    /// Create a campaign sender
    ///
    /// `batch_size` must be at least 1 (enforced by config validation).
    pub fn new(
        email: Arc<EmailService>,
        tokens: UnsubscribeTokens,
        public_url: String,
        batch_size: usize,
        batch_delay: Duration,
    ) -> Self {
        Self { email, tokens, public_url, batch_size: batch_size.max(1), batch_delay }
    }

    /// Send the weekly digest to every user subscribed to it
    pub async fn send_weekly_digest<S: StorageBackend>(
        &self,
        users: &UserRepository<S>,
        preferences: &NotificationPreferencesRepository<S>,
        items: Vec<DigestItem>,
    ) -> Result<CampaignStats> {
        self.run(users, preferences, NotificationKind::WeeklyDigest, |user, unsub| {
            let template = WeeklyDigestEmailTemplate {
                name: user.name.clone(),
                items: items
                    .iter()
                    .map(|item| DigestItem {
                        name: item.name.clone(),
                        summary: item.summary.clone(),
                        url: item.url.clone(),
                    })
                    .collect(),
                unsubscribe_url: unsub,
            };
            (template.subject(), template.body_html(), template.body_text())
        })
        .await
    }

    /// Send a one-off announcement to every user subscribed to marketing
    pub async fn send_announcement<S: StorageBackend>(
        &self,
        users: &UserRepository<S>,
        preferences: &NotificationPreferencesRepository<S>,
        title: &str,
        body: &str,
    ) -> Result<CampaignStats> {
        self.run(users, preferences, NotificationKind::Marketing, |_user, unsub| {
            let template = AnnouncementEmailTemplate {
                title: title.to_string(),
                body: body.to_string(),
                unsubscribe_url: unsub,
            };
            (template.subject(), template.body_html(), template.body_text())
        })
        .await
    }

    /// Shared campaign loop
    ///
    /// `render` produces `(subject, html, text)` for one recipient given
    /// their personal unsubscribe URL.
    async fn run<S: StorageBackend>(
        &self,
        users: &UserRepository<S>,
        preferences: &NotificationPreferencesRepository<S>,
        kind: NotificationKind,
        render: impl Fn(&User, String) -> (String, String, String),
    ) -> Result<CampaignStats> {
        // Fail before the first send when tokens cannot be issued at all
        self.tokens.generate("probe")?;

        let recipients = users.list_active().await?;
        let mut stats = CampaignStats::default();
        let mut in_batch = 0usize;

        for user in recipients {
            if !preferences.get_or_default(user.id).await?.is_enabled(kind) {
                stats.skipped += 1;
                continue;
            }

            if in_batch == self.batch_size {
                stats.batches += 1;
                in_batch = 0;
                if !self.batch_delay.is_zero() {
                    tokio::time::sleep(self.batch_delay).await;
                }
            }
            in_batch += 1;

            let token = self.tokens.generate(&user.id.to_string())?;
            let unsub = unsubscribe_url(&self.public_url, &token, kind);
            let (subject, html, text) = render(&user, unsub);

            match self.email.send_email(&user.email, &subject, &html, &text).await {
                Ok(()) => stats.sent += 1,
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!(
                        user_id = user.id,
                        error = %e,
                        "Campaign send failed for recipient, continuing"
                    );
                },
            }
        }

        if in_batch > 0 {
            stats.batches += 1;
        }

        tracing::info!(
            kind = %kind,
            sent = stats.sent,
            skipped = stats.skipped,
            failed = stats.failed,
            batches = stats.batches,
            "Campaign completed"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use skilldir_storage::MemoryBackend;
    use skilldir_types::entities::NotificationPreferences;

    use super::*;
    use crate::email::MockEmailSender;

    fn sender_with(mock: MockEmailSender, batch_size: usize) -> CampaignSender {
        CampaignSender::new(
            Arc::new(EmailService::new(Box::new(mock))),
            UnsubscribeTokens::new(Some("campaign-secret".to_string()), None),
            "https://skilldir.dev".to_string(),
            batch_size,
            Duration::ZERO,
        )
    }

    async fn seed_users(users: &UserRepository<MemoryBackend>, count: i64) {
        for id in 1..=count {
            users
                .create(
                    User::builder()
                        .id(id)
                        .provider_subject(format!("idp|{id}"))
                        .name(format!("User {id}"))
                        .email(format!("user{id}@example.com"))
                        .create()
                        .unwrap(),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_announcement_reaches_opted_in_users_only() {
        let storage = MemoryBackend::new();
        let users = UserRepository::new(storage.clone());
        let preferences = NotificationPreferencesRepository::new(storage);
        seed_users(&users, 3).await;

        // User 2 opted out of marketing
        let mut prefs = NotificationPreferences::new(2);
        prefs.unsubscribe(NotificationKind::Marketing);
        preferences.upsert(prefs).await.unwrap();

        let mock = MockEmailSender::new();
        let campaign = sender_with(mock.clone(), 10);

        let stats = campaign
            .send_announcement(&users, &preferences, "Hello", "Big news.")
            .await
            .unwrap();

        assert_eq!(stats.sent, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 0);

        let recipients: Vec<String> = mock.sent().iter().map(|m| m.to.clone()).collect();
        assert_eq!(recipients, vec!["user1@example.com", "user3@example.com"]);
    }

    #[tokio::test]
    async fn test_batches_are_counted() {
        let storage = MemoryBackend::new();
        let users = UserRepository::new(storage.clone());
        let preferences = NotificationPreferencesRepository::new(storage);
        seed_users(&users, 5).await;

        let campaign = sender_with(MockEmailSender::new(), 2);
        let stats =
            campaign.send_announcement(&users, &preferences, "Hi", "Text").await.unwrap();

        assert_eq!(stats.sent, 5);
        assert_eq!(stats.batches, 3); // 2 + 2 + 1
    }

    #[tokio::test]
    async fn test_failed_sends_are_skipped_not_fatal() {
        let storage = MemoryBackend::new();
        let users = UserRepository::new(storage.clone());
        let preferences = NotificationPreferencesRepository::new(storage);
        seed_users(&users, 3).await;

        let campaign = sender_with(MockEmailSender::new_failing(), 10);
        let stats =
            campaign.send_announcement(&users, &preferences, "Hi", "Text").await.unwrap();

        assert_eq!(stats.sent, 0);
        assert_eq!(stats.failed, 3);
    }

    #[tokio::test]
    async fn test_missing_secret_aborts_before_sending() {
        let storage = MemoryBackend::new();
        let users = UserRepository::new(storage.clone());
        let preferences = NotificationPreferencesRepository::new(storage);
        seed_users(&users, 2).await;

        let mock = MockEmailSender::new();
        let campaign = CampaignSender::new(
            Arc::new(EmailService::new(Box::new(mock.clone()))),
            UnsubscribeTokens::new(None, None),
            "https://skilldir.dev".to_string(),
            10,
            Duration::ZERO,
        );

        let result = campaign.send_announcement(&users, &preferences, "Hi", "Text").await;
        assert!(result.is_err());
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn test_digest_embeds_personal_unsubscribe_links() {
        let storage = MemoryBackend::new();
        let users = UserRepository::new(storage.clone());
        let preferences = NotificationPreferencesRepository::new(storage);
        seed_users(&users, 2).await;

        let mock = MockEmailSender::new();
        let campaign = sender_with(mock.clone(), 10);

        let items = vec![DigestItem {
            name: "Flaky Test Hunter".to_string(),
            summary: "Finds flaky tests".to_string(),
            url: "https://skilldir.dev/skills/flaky-test-hunter".to_string(),
        }];
        campaign.send_weekly_digest(&users, &preferences, items).await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 2);
        for mail in &sent {
            assert!(mail.body_text.contains("/unsubscribe?token="));
            assert!(mail.body_text.contains("type=weekly_digest"));
        }
        // Tokens are per-recipient
        assert_ne!(sent[0].body_text, sent[1].body_text);
    }
}
