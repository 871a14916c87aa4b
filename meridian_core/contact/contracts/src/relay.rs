use std::future::Future;

use meridian_email_contracts::EmailSendError;
use meridian_models::{contact::ContactRequest, delivery::DeliveryReceipt};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRelayService: Send + Sync + 'static {
    /// Compose the inquiry email for a contact request and send it.
    fn send(
        &self,
        request: ContactRequest,
    ) -> impl Future<Output = Result<DeliveryReceipt, ContactRelayError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactRelayError {
    #[error(transparent)]
    Delivery(#[from] EmailSendError),
    #[error("Failed to render contact email: {0:#}")]
    Render(anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactRelayService {
    pub fn with_send(
        mut self,
        request: ContactRequest,
        result: Result<DeliveryReceipt, ContactRelayError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
