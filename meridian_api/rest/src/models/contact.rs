use meridian_models::{
    contact::{ContactRequest, ContactRequestMessage, ContactRequestName, ContactRequestSubject},
    delivery::DeliveryReceipt,
    email_address::EmailAddress,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactRequest {
    /// Full name of the inquirer
    pub name: ContactRequestName,
    /// Email address replies are sent to
    pub email: EmailAddress,
    pub subject: ContactRequestSubject,
    pub message: ContactRequestMessage,
}

impl From<ApiContactRequest> for ContactRequest {
    fn from(value: ApiContactRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDeliveryReceipt {
    pub success: bool,
    pub message_id: String,
}

impl From<DeliveryReceipt> for ApiDeliveryReceipt {
    fn from(value: DeliveryReceipt) -> Self {
        Self {
            success: true,
            message_id: value.message_id,
        }
    }
}
