//! SMTP delivery of the run's single report email.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;
use vault_monitor_core::{EmailConfig, Notifier, Report};

/// Sends reports over implicit-TLS SMTP (SMTPS) with username/password
/// auth. One message per run; delivery failure is fatal, with no retry and
/// no fallback channel.
pub struct SmtpNotifier {
    config: EmailConfig,
}

impl SmtpNotifier {
    #[must_use]
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(
            self.config.sender.clone(),
            self.config.password.clone(),
        );

        // relay() wraps the connection in TLS from the first byte (SMTPS).
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .context("Invalid SMTP relay host")?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(transport)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, report: &Report) -> Result<()> {
        let message = Message::builder()
            .from(self.config.sender.parse().context("Invalid sender address")?)
            .to(self
                .config
                .recipient
                .parse()
                .context("Invalid recipient address")?)
            .subject(report.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(report.body.clone())
            .context("Failed to build email message")?;

        self.transport()?
            .send(message)
            .await
            .context("SMTP delivery failed")?;

        info!("Email sent to {}", self.config.recipient);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            sender: "alerts@example.com".to_string(),
            recipient: "ops@example.com".to_string(),
            password: "app-password".to_string(),
        }
    }

    #[test]
    fn transport_builds_for_valid_host() {
        let notifier = SmtpNotifier::new(config());
        assert!(notifier.transport().is_ok());
    }

    #[tokio::test]
    async fn malformed_sender_is_rejected_before_connecting() {
        let mut bad = config();
        bad.sender = "not an address".to_string();
        let notifier = SmtpNotifier::new(bad);

        let report = Report {
            subject: "subject".to_string(),
            body: "body".to_string(),
        };

        let err = notifier.send(&report).await.unwrap_err();
        assert!(err.to_string().contains("sender"));
    }
}
