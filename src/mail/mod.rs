// mail/mod.rs — quote delivery over SMTP.
//
// `Mailer` is the seam the send-quote route talks to. `SmtpMailer` drives
// lettre's async transport: port 465 opens with implicit TLS, every other
// port negotiates STARTTLS.

pub mod template;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpSettings;

/// Outbound mail interface.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one HTML mail to a single recipient.
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}

/// Production SMTP transport built from `SmtpSettings`.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport. Callers check `SmtpSettings::configured()`
    /// first; missing fields here are a hard error.
    pub fn from_settings(settings: &SmtpSettings) -> Result<Self> {
        let host = settings.host.as_deref().context("SMTP host missing")?;
        let user = settings.user.clone().context("SMTP user missing")?;
        let pass = settings.pass.clone().context("SMTP password missing")?;

        let builder = if settings.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .with_context(|| format!("invalid SMTP relay '{host}'"))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(user, pass))
            .build();

        let from = settings
            .from
            .parse::<Mailbox>()
            .with_context(|| format!("invalid SMTP_FROM address '{}'", settings.from))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .with_context(|| format!("invalid recipient address '{to}'"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .context("failed to build mail")?;

        self.transport
            .send(message)
            .await
            .context("SMTP send failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(port: u16) -> SmtpSettings {
        SmtpSettings {
            host: Some("smtp.example.com".to_string()),
            port,
            user: Some("mailer".to_string()),
            pass: Some("hunter2".to_string()),
            from: crate::config::DEFAULT_FROM.to_string(),
        }
    }

    #[test]
    fn port_465_selects_implicit_tls() {
        assert!(settings(465).implicit_tls());
        assert!(!settings(587).implicit_tls());
        assert!(!settings(2525).implicit_tls());
    }

    #[tokio::test]
    async fn builds_a_starttls_transport() {
        assert!(SmtpMailer::from_settings(&settings(587)).is_ok());
    }

    #[tokio::test]
    async fn builds_an_implicit_tls_transport() {
        assert!(SmtpMailer::from_settings(&settings(465)).is_ok());
    }

    #[test]
    fn rejects_missing_credentials() {
        let mut incomplete = settings(587);
        incomplete.pass = None;
        assert!(SmtpMailer::from_settings(&incomplete).is_err());
    }

    #[tokio::test]
    async fn rejects_an_unparseable_sender() {
        let mut bad_from = settings(587);
        bad_from.from = "not an address".to_string();
        assert!(SmtpMailer::from_settings(&bad_from).is_err());
    }

    #[test]
    fn default_sender_parses_as_a_mailbox() {
        let mailbox: Mailbox = crate::config::DEFAULT_FROM.parse().unwrap();
        assert_eq!(mailbox.email.to_string(), "noreply@echovibe.studio");
        assert_eq!(mailbox.name.as_deref(), Some("EchoVibe Studio"));
    }
}
