//! Typed client for the contact relay's REST api.

use meridian_models::{contact::ContactRequest, delivery::DeliveryReceipt};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::http::HttpClient;

mod http;

#[derive(Debug, Clone)]
pub struct ContactClient {
    client: HttpClient,
    contact_endpoint: Url,
}

#[derive(Debug, Error)]
pub enum ContactClientError {
    #[error("The server rejected the request ({status}): {detail}")]
    Rejected { status: StatusCode, detail: String },
    #[error("The server did not report a successful delivery")]
    Unsuccessful,
    #[error("Invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ContactClient {
    /// Create a client for the server reachable at `base_url`. A path in
    /// `base_url` must end with a slash to be kept.
    pub fn new(base_url: Url) -> Result<Self, ContactClientError> {
        Ok(Self {
            client: HttpClient::new()?,
            contact_endpoint: base_url.join("contact")?,
        })
    }

    pub async fn submit(
        &self,
        request: &ContactRequest,
    ) -> Result<DeliveryReceipt, ContactClientError> {
        let response = self
            .client
            .post(self.contact_endpoint.clone())
            .json(&SubmitRequest::from(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let detail = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(ErrorResponse { detail }) => detail,
                Err(_) => body,
            };
            return Err(ContactClientError::Rejected { status, detail });
        }

        let response = response.json::<SubmitResponse>().await?;
        if !response.success {
            return Err(ContactClientError::Unsuccessful);
        }

        Ok(DeliveryReceipt::new(response.message_id))
    }
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

impl<'a> From<&'a ContactRequest> for SubmitRequest<'a> {
    fn from(value: &'a ContactRequest) -> Self {
        Self {
            name: &value.name,
            email: value.email.as_str(),
            subject: &value.subject,
            message: &value.message,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    success: bool,
    message_id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    detail: String,
}
