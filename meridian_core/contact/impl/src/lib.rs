use meridian_core_contact_contracts::{
    relay::ContactRelayService, ContactFeatureService, ContactSubmitError,
};
use meridian_models::{contact::ContactRequest, delivery::DeliveryReceipt};
use tracing::{error, info};

pub mod relay;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Relay> {
    relay: Relay,
}

impl<Relay> ContactFeatureServiceImpl<Relay> {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }
}

impl<Relay> ContactFeatureService for ContactFeatureServiceImpl<Relay>
where
    Relay: ContactRelayService,
{
    async fn submit(&self, request: ContactRequest) -> Result<DeliveryReceipt, ContactSubmitError> {
        match self.relay.send(request).await {
            Ok(receipt) => {
                info!(message_id = %receipt.message_id, "Relayed contact request");
                Ok(receipt)
            }
            Err(err) => {
                error!("Failed to relay contact request: {err}");
                Err(ContactSubmitError::DeliveryFailed)
            }
        }
    }
}
