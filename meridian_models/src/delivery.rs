/// Acknowledgment of a successfully relayed email.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryReceipt {
    /// The `Message-ID` header the email was sent with.
    pub message_id: String,
}

impl DeliveryReceipt {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }
}
