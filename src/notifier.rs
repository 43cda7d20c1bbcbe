use async_trait::async_trait;
use chrono::Local;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use crate::config::EmailConfig;
use crate::models::Posting;
use crate::utils::error::Result;
use crate::utils::text::{escape_html, truncate_chars};

/// Description characters shown per posting in the digest.
const DISPLAY_DESCRIPTION_CHARS: usize = 300;

/// Delivers one digest of new postings per run.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_digest(&self, postings: &[Posting]);
}

/// SMTP notifier: one multipart/alternative message over STARTTLS with
/// password authentication.
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn format_subject(&self, count: usize) -> String {
        format!(
            "TAMU Job Alert - {} New Job(s) ({})",
            count,
            Local::now().format("%Y-%m-%d")
        )
    }

    fn format_html_body(&self, postings: &[Posting]) -> String {
        let mut html = String::new();
        html.push_str("<html><body><h2>🐢 TAMU Wildlife Job Alert</h2>\n<ul>\n");

        for posting in postings {
            html.push_str(&format!(
                "<li>\n\
                 <strong>{}</strong><br/>\n\
                 <a href=\"{}\" target=\"_blank\">View Posting</a><br/>\n\
                 <em>Keywords: {}</em><br/>\n\
                 <p>{}...</p>\n\
                 </li><br/>\n",
                escape_html(&posting.title),
                posting.url,
                posting.matching_keywords.join(", "),
                escape_html(&truncate_chars(&posting.description, DISPLAY_DESCRIPTION_CHARS)),
            ));
        }

        html.push_str("</ul></body></html>");
        html
    }

    fn format_text_body(&self, postings: &[Posting]) -> String {
        let mut text = String::new();
        for posting in postings {
            text.push_str(&format!("{}\n", posting.title));
            text.push_str(&format!("{}\n", posting.url));
            text.push_str(&format!(
                "Keywords: {}\n",
                posting.matching_keywords.join(", ")
            ));
            text.push_str(&format!(
                "{}...\n\n",
                truncate_chars(&posting.description, DISPLAY_DESCRIPTION_CHARS)
            ));
        }
        text
    }

    async fn try_send(&self, postings: &[Posting]) -> Result<()> {
        let email = Message::builder()
            .from(self.config.from_email.parse()?)
            .to(self.config.to_email.parse()?)
            .subject(self.format_subject(postings.len()))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(self.format_text_body(postings)),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(self.format_html_body(postings)),
                    ),
            )?;

        let credentials = Credentials::new(
            self.config.from_email.clone(),
            self.config.password.clone(),
        );

        info!("connecting to email server...");
        let mailer =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)?
                .port(self.config.smtp_port)
                .credentials(credentials)
                .build();

        mailer.send(email).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    /// Empty input is a no-op. A transport failure is logged and swallowed so
    /// the caller still records the attempted postings as sent.
    async fn send_digest(&self, postings: &[Posting]) {
        if postings.is_empty() {
            info!("no new jobs to send");
            return;
        }

        match self.try_send(postings).await {
            Ok(()) => info!("email sent with {} posting(s)", postings.len()),
            Err(e) => error!("failed to send email: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER};

    fn notifier() -> EmailNotifier {
        EmailNotifier::new(EmailConfig {
            from_email: "alerts@example.com".to_string(),
            password: "app-password".to_string(),
            to_email: "me@example.com".to_string(),
            smtp_server: DEFAULT_SMTP_SERVER.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
        })
    }

    fn posting() -> Posting {
        Posting {
            id: "abc".to_string(),
            title: "Wildlife Biologist - Sea Turtle Program <field crew>".to_string(),
            url: "https://jobs.rwfm.tamu.edu/jobs/123".to_string(),
            description: "d".repeat(1000),
            scraped_date: "2026-08-06 09:00:00".to_string(),
            matching_keywords: vec!["turtle".to_string(), "island".to_string()],
        }
    }

    #[test]
    fn test_subject_counts_postings() {
        let subject = notifier().format_subject(3);
        assert!(subject.starts_with("TAMU Job Alert - 3 New Job(s) ("));
    }

    #[test]
    fn test_html_body_escapes_and_links() {
        let html = notifier().format_html_body(&[posting()]);

        assert!(html.contains("Sea Turtle Program &lt;field crew&gt;"));
        assert!(html.contains(r#"<a href="https://jobs.rwfm.tamu.edu/jobs/123" target="_blank">"#));
        assert!(html.contains("Keywords: turtle, island"));
        assert!(!html.contains("<field crew>"));
    }

    #[test]
    fn test_html_body_truncates_description_for_display() {
        let html = notifier().format_html_body(&[posting()]);
        let shown = "d".repeat(300);
        assert!(html.contains(&format!("<p>{}...</p>", shown)));
        assert!(!html.contains(&"d".repeat(301)));
    }

    #[test]
    fn test_text_body_lists_every_posting() {
        let mut second = posting();
        second.title = "Herpetology Crew Lead".to_string();

        let text = notifier().format_text_body(&[posting(), second]);
        assert!(text.contains("Wildlife Biologist"));
        assert!(text.contains("Herpetology Crew Lead"));
        assert!(text.contains("Keywords: turtle, island"));
    }
}
