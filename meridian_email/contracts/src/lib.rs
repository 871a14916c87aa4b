use std::{future::Future, time::Duration};

use meridian_models::{delivery::DeliveryReceipt, email_address::EmailAddressWithName};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Send a single email and return the message id it was sent with.
    fn send(
        &self,
        email: Email,
    ) -> impl Future<Output = Result<DeliveryReceipt, EmailSendError>> + Send;

    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub sender: EmailAddressWithName,
    pub recipient: EmailAddressWithName,
    pub reply_to: Option<EmailAddressWithName>,
    pub subject: String,
    pub body: EmailBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Text(String),
    /// `multipart/alternative` with a plain text and an html representation
    Alternative { text: String, html: String },
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("Failed to reach the smtp server: {0:#}")]
    Transport(anyhow::Error),
    #[error("The smtp server rejected the credentials: {0:#}")]
    Auth(anyhow::Error),
    #[error("The smtp server did not respond within {0:?}")]
    Timeout(Duration),
    /// Permanent (5xx) reply to the envelope or the message content.
    #[error("The smtp server refused the email: {0:#}")]
    Rejected(anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(
        mut self,
        email: Email,
        result: Result<DeliveryReceipt, EmailSendError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, ok: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if ok {
                Ok(())
            } else {
                Err(anyhow::anyhow!("Failed to ping smtp server"))
            }))
        });
        self
    }
}
