//! Outbound email templates.
//!
//! Each template renders a subject plus HTML and plain-text bodies. All
//! user-controlled values pass through [`super::html_escape`] before being
//! interpolated into HTML. Marketing-category templates carry an
//! unsubscribe link whose token authorizes the preference change without a
//! login.

use skilldir_types::entities::NotificationKind;

use super::html_escape;

/// A renderable email
pub trait EmailTemplate {
    /// Subject line
    fn subject(&self) -> String;
    /// HTML body
    fn body_html(&self) -> String;
    /// Plain text body (fallback)
    fn body_text(&self) -> String;
}

/// Build the one-click unsubscribe URL embedded in marketing mail
///
/// The token is base64url and the kind wire name is snake_case, so neither
/// needs percent-encoding.
pub fn unsubscribe_url(public_url: &str, token: &str, kind: NotificationKind) -> String {
    format!("{public_url}/unsubscribe?token={token}&type={kind}")
}

/// Welcome mail sent after first login (transactional, no unsubscribe link)
pub struct WelcomeEmailTemplate {
    /// Recipient display name
    pub name: String,
    /// Public base URL of the site
    pub public_url: String,
}

impl EmailTemplate for WelcomeEmailTemplate {
    fn subject(&self) -> String {
        "Welcome to Skilldir".to_string()
    }

    fn body_html(&self) -> String {
        format!(
            "<h1>Welcome, {name}!</h1>\
             <p>Your account is ready. Browse QA testing skills for your \
             coding agents, or publish your own.</p>\
             <p><a href=\"{url}/skills\">Explore the directory</a></p>",
            name = html_escape(&self.name),
            url = self.public_url,
        )
    }

    fn body_text(&self) -> String {
        format!(
            "Welcome, {}!\n\n\
             Your account is ready. Browse QA testing skills for your coding \
             agents, or publish your own: {}/skills\n",
            self.name, self.public_url,
        )
    }
}

/// One skill row in the weekly digest
pub struct DigestItem {
    pub name: String,
    pub summary: String,
    pub url: String,
}

/// Weekly digest of trending skills (marketing category: weekly_digest)
pub struct WeeklyDigestEmailTemplate {
    /// Recipient display name
    pub name: String,
    /// Top skills of the week, in rank order
    pub items: Vec<DigestItem>,
    /// One-click unsubscribe URL for this recipient
    pub unsubscribe_url: String,
}

impl EmailTemplate for WeeklyDigestEmailTemplate {
    fn subject(&self) -> String {
        "This week on Skilldir".to_string()
    }

    fn body_html(&self) -> String {
        let mut items = String::new();
        for item in &self.items {
            items.push_str(&format!(
                "<li><a href=\"{url}\">{name}</a> — {summary}</li>",
                url = item.url,
                name = html_escape(&item.name),
                summary = html_escape(&item.summary),
            ));
        }

        format!(
            "<h1>Hi {name},</h1>\
             <p>The most installed QA skills this week:</p>\
             <ol>{items}</ol>\
             <p style=\"font-size:12px;color:#666\">\
             <a href=\"{unsub}\">Unsubscribe from the weekly digest</a></p>",
            name = html_escape(&self.name),
            unsub = self.unsubscribe_url,
        )
    }

    fn body_text(&self) -> String {
        let mut body = format!("Hi {},\n\nThe most installed QA skills this week:\n\n", self.name);
        for (rank, item) in self.items.iter().enumerate() {
            body.push_str(&format!(
                "{}. {} — {}\n   {}\n",
                rank + 1,
                item.name,
                item.summary,
                item.url
            ));
        }
        body.push_str(&format!("\nUnsubscribe: {}\n", self.unsubscribe_url));
        body
    }
}

/// Free-form announcement mail (marketing category: marketing)
pub struct AnnouncementEmailTemplate {
    /// Subject line
    pub title: String,
    /// Announcement body (plain text; rendered as a paragraph)
    pub body: String,
    /// One-click unsubscribe URL for this recipient
    pub unsubscribe_url: String,
}

impl EmailTemplate for AnnouncementEmailTemplate {
    fn subject(&self) -> String {
        self.title.clone()
    }

    fn body_html(&self) -> String {
        format!(
            "<h1>{title}</h1>\
             <p>{body}</p>\
             <p style=\"font-size:12px;color:#666\">\
             <a href=\"{unsub}\">Unsubscribe from announcements</a></p>",
            title = html_escape(&self.title),
            body = html_escape(&self.body),
            unsub = self.unsubscribe_url,
        )
    }

    fn body_text(&self) -> String {
        format!("{}\n\n{}\n\nUnsubscribe: {}\n", self.title, self.body, self.unsubscribe_url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unsubscribe_url_shape() {
        let url = unsubscribe_url("https://skilldir.dev", "abc.def", NotificationKind::Marketing);
        assert_eq!(url, "https://skilldir.dev/unsubscribe?token=abc.def&type=marketing");
    }

    #[test]
    fn test_welcome_escapes_name() {
        let template = WelcomeEmailTemplate {
            name: "<script>alert(1)</script>".to_string(),
            public_url: "https://skilldir.dev".to_string(),
        };
        let html = template.body_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_digest_lists_items_in_order_with_unsubscribe() {
        let template = WeeklyDigestEmailTemplate {
            name: "Alice".to_string(),
            items: vec![
                DigestItem {
                    name: "First".to_string(),
                    summary: "one".to_string(),
                    url: "https://skilldir.dev/skills/first".to_string(),
                },
                DigestItem {
                    name: "Second".to_string(),
                    summary: "two".to_string(),
                    url: "https://skilldir.dev/skills/second".to_string(),
                },
            ],
            unsubscribe_url: "https://skilldir.dev/unsubscribe?token=t&type=weekly_digest"
                .to_string(),
        };

        let text = template.body_text();
        let first = text.find("1. First").unwrap();
        let second = text.find("2. Second").unwrap();
        assert!(first < second);
        assert!(text.contains("type=weekly_digest"));

        let html = template.body_html();
        assert!(html.contains("Unsubscribe"));
    }

    #[test]
    fn test_announcement_contains_unsubscribe_link() {
        let template = AnnouncementEmailTemplate {
            title: "New category: fuzzing".to_string(),
            body: "Fuzzing skills now have their own shelf.".to_string(),
            unsubscribe_url: "https://skilldir.dev/unsubscribe?token=t&type=marketing".to_string(),
        };
        assert!(template.body_html().contains("token=t&type=marketing"));
        assert!(template.body_text().contains("token=t&type=marketing"));
        assert_eq!(template.subject(), "New category: fuzzing");
    }
}
