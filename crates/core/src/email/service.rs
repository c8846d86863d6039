//! Email delivery.
//!
//! [`EmailSender`] is the seam between message composition and transport:
//! production wires in [`SmtpEmailService`], tests wire in
//! [`MockEmailSender`]. Senders are constructed once at startup and shared
//! through [`EmailService`]; handlers never build transports themselves.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use skilldir_types::error::{Error, Result};

/// Transport abstraction for outbound mail
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver one message with an HTML body and a plain-text fallback
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body_html: &str,
        body_text: &str,
    ) -> Result<()>;
}

/// Sender backed by an SMTP relay
pub struct SmtpEmailService {
    from_address: String,
    from_name: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Build an SMTP sender
    ///
    /// Pass empty `username`/`password` for an unauthenticated relay; one
    /// without the other is a configuration mistake and is rejected. The
    /// `insecure` flag switches to an unencrypted transport for local
    /// tooling such as Mailpit.
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from_address: String,
        from_name: String,
        insecure: bool,
    ) -> Result<Self> {
        if username.is_empty() != password.is_empty() {
            return Err(Error::validation(
                "SMTP username and password must both be provided or both be empty",
            ));
        }

        let transport = if insecure {
            tracing::warn!(host, port, "SMTP transport is unencrypted; do not use in production");
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port).build()
        } else {
            let relay = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| Error::internal(format!("SMTP relay setup failed: {e}")))?
                .port(port);

            if username.is_empty() {
                relay.build()
            } else {
                relay
                    .credentials(Credentials::new(username.to_owned(), password.to_owned()))
                    .build()
            }
        };

        Ok(Self { from_address, from_name, transport })
    }

    fn from_mailbox(&self) -> Result<Mailbox> {
        format!("{} <{}>", self.from_name, self.from_address)
            .parse()
            .map_err(|e| Error::internal(format!("From address does not parse: {e}")))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body_html: &str,
        body_text: &str,
    ) -> Result<()> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| Error::validation(format!("Recipient address does not parse: {e}")))?;

        // Plain part first: multipart/alternative lists parts in increasing
        // order of preference (RFC 2046 section 5.1.4).
        let message = Message::builder()
            .from(self.from_mailbox()?)
            .to(recipient)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                body_text.to_owned(),
                body_html.to_owned(),
            ))
            .map_err(|e| Error::internal(format!("Message assembly failed: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| Error::external(format!("SMTP delivery failed: {e}")))?;

        tracing::info!(to, subject, "Email delivered");
        Ok(())
    }
}

/// Shared handle to the configured sender
pub struct EmailService {
    sender: Box<dyn EmailSender>,
}

impl EmailService {
    /// Wrap a sender
    pub fn new(sender: Box<dyn EmailSender>) -> Self {
        Self { sender }
    }

    /// Deliver one message through the configured sender
    pub async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body_html: &str,
        body_text: &str,
    ) -> Result<()> {
        self.sender.send_email(to, subject, body_html, body_text).await
    }
}

/// An email captured by [`MockEmailSender`]
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body_html: String,
    pub body_text: String,
}

/// Recording sender for tests
///
/// Captures every message instead of delivering it so tests can assert on
/// recipients and bodies. `new_failing` builds a variant whose every send
/// errors, for exercising failure paths.
#[derive(Clone, Default)]
pub struct MockEmailSender {
    should_fail: bool,
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailSender {
    /// Sender that records and succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender whose every send fails
    pub fn new_failing() -> Self {
        Self { should_fail: true, sent: Arc::new(Mutex::new(Vec::new())) }
    }

    /// All messages recorded so far
    pub fn sent(&self) -> Vec<SentEmail> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body_html: &str,
        body_text: &str,
    ) -> Result<()> {
        if self.should_fail {
            tracing::warn!(to, subject, "Mock sender configured to fail");
            return Err(Error::internal("Mock email send failure".to_string()));
        }

        tracing::debug!(to, subject, "Mock sender recorded message");
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body_html: body_html.to_string(),
                body_text: body_text.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn two_part_message() -> Message {
        Message::builder()
            .from("sender@example.com".parse::<Mailbox>().unwrap())
            .to("recipient@example.com".parse::<Mailbox>().unwrap())
            .subject("Two parts")
            .multipart(MultiPart::alternative_plain_html(
                String::from("plain body"),
                String::from("<p>html body</p>"),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_service_delegates_to_sender() {
        let mock = MockEmailSender::new();
        let service = EmailService::new(Box::new(mock.clone()));

        service.send_email("test@example.com", "Hi", "<p>HTML</p>", "Text").await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "test@example.com");
        assert_eq!(sent[0].subject, "Hi");
    }

    #[tokio::test]
    async fn test_failing_sender_surfaces_error_and_records_nothing() {
        let mock = MockEmailSender::new_failing();
        let service = EmailService::new(Box::new(mock.clone()));

        let result = service.send_email("test@example.com", "Hi", "<p>HTML</p>", "Text").await;
        assert!(result.is_err());
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn test_mock_records_in_order() {
        let mock = MockEmailSender::new();
        mock.send_email("a@example.com", "first", "<p>1</p>", "1").await.unwrap();
        mock.send_email("b@example.com", "second", "<p>2</p>", "2").await.unwrap();

        let subjects: Vec<String> = mock.sent().iter().map(|m| m.subject.clone()).collect();
        assert_eq!(subjects, vec!["first", "second"]);
    }

    #[test]
    fn test_message_is_multipart_alternative() {
        let formatted = String::from_utf8(two_part_message().formatted()).unwrap();
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("Content-Type: text/plain"));
        assert!(formatted.contains("Content-Type: text/html"));
    }

    #[test]
    fn test_preferred_html_part_comes_last() {
        let formatted = String::from_utf8(two_part_message().formatted()).unwrap();
        let text_pos = formatted.find("Content-Type: text/plain").unwrap();
        let html_pos = formatted.find("Content-Type: text/html").unwrap();
        assert!(text_pos < html_pos);
    }
}
