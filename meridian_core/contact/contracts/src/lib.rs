use std::future::Future;

use meridian_models::{contact::ContactRequest, delivery::DeliveryReceipt};
use thiserror::Error;

pub mod relay;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Forward a contact form submission to the administrative mailbox.
    ///
    /// Exactly one email is sent per call. The cause of a failed delivery is
    /// logged but never returned to the caller.
    fn submit(
        &self,
        request: ContactRequest,
    ) -> impl Future<Output = Result<DeliveryReceipt, ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Failed to send email")]
    DeliveryFailed,
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        request: ContactRequest,
        result: Result<DeliveryReceipt, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
