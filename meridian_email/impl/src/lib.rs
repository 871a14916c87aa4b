use std::time::Duration;

use anyhow::anyhow;
use lettre::{
    message::{header, MessageBuilder, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use meridian_email_contracts::{Email, EmailBody, EmailSendError, EmailService};
use meridian_models::{delivery::DeliveryReceipt, Sensitive};
use meridian_utils::Apply;
use tracing::debug;
use uuid::Uuid;

/// SMTP reply codes a server answers with when authentication is required or
/// the credentials were not accepted.
const AUTH_FAILURE_CODES: &[&str] = &["530", "534", "535"];

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    pub credentials: Option<SmtpCredentials>,
    /// Upper bound for a single send, including connection setup.
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub user: String,
    pub pass: Sensitive<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Plain text connection.
    None,
    /// Upgrade via STARTTLS if the server offers it.
    Opportunistic,
    /// Require STARTTLS.
    StartTls,
    /// Implicit TLS (usually port 465).
    Tls,
}

impl EmailServiceImpl {
    /// Configure the pooled SMTP transport. No connection is established until
    /// the first email is sent or the server is pinged.
    pub fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        let tls = match config.security {
            SmtpSecurity::None => Tls::None,
            SmtpSecurity::Opportunistic => {
                Tls::Opportunistic(TlsParameters::new(config.host.clone())?)
            }
            SmtpSecurity::StartTls => Tls::Required(TlsParameters::new(config.host.clone())?),
            SmtpSecurity::Tls => Tls::Wrapper(TlsParameters::new(config.host.clone())?),
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host)
            .port(config.port)
            .tls(tls)
            .timeout(Some(config.timeout))
            .apply_map(config.credentials, |builder, SmtpCredentials { user, pass }| {
                builder.credentials(Credentials::new(user, pass.0))
            })
            .build();

        Ok(Self {
            transport,
            timeout: config.timeout,
        })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<DeliveryReceipt, EmailSendError> {
        let message_id = make_message_id(email.sender.0.email.domain());
        let message = build_message(email, message_id.clone()).map_err(anyhow::Error::from)?;

        tokio::time::timeout(self.timeout, self.transport.send(message))
            .await
            .map_err(|_| EmailSendError::Timeout(self.timeout))?
            .map_err(classify_error)?;

        debug!(%message_id, "email accepted by smtp server");
        Ok(DeliveryReceipt::new(message_id))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        tokio::time::timeout(self.timeout, self.transport.test_connection())
            .await
            .map_err(|_| anyhow!("Timed out after {:?} while pinging smtp server", self.timeout))??
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn make_message_id(domain: &str) -> String {
    format!("<{}@{domain}>", Uuid::new_v4())
}

fn build_message(email: Email, message_id: String) -> Result<Message, lettre::error::Error> {
    let builder = Message::builder()
        .message_id(Some(message_id))
        .from(email.sender.0)
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    match email.body {
        EmailBody::Text(text) => builder.header(header::ContentType::TEXT_PLAIN).body(text),
        EmailBody::Alternative { text, html } => {
            builder.multipart(MultiPart::alternative_plain_html(text, html))
        }
    }
}

fn classify_error(err: lettre::transport::smtp::Error) -> EmailSendError {
    let auth_failure = err
        .status()
        .is_some_and(|code| AUTH_FAILURE_CODES.contains(&code.to_string().as_str()));

    if auth_failure {
        EmailSendError::Auth(err.into())
    } else if err.is_permanent() {
        EmailSendError::Rejected(err.into())
    } else {
        EmailSendError::Transport(err.into())
    }
}
