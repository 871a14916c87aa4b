use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use meridian_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use super::error;
use crate::models::contact::{ApiContactRequest, ApiDeliveryReceipt};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Json(request): Json<ApiContactRequest>,
) -> Response {
    match service.submit(request.into()).await {
        Ok(receipt) => Json(ApiDeliveryReceipt::from(receipt)).into_response(),
        Err(ContactSubmitError::DeliveryFailed) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use meridian_core_contact_contracts::MockContactFeatureService;
    use meridian_models::{contact::ContactRequest, delivery::DeliveryReceipt};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn jane() -> Value {
        json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "subject": "Quote request",
            "message": "Need rates for\nLondon to Tokyo",
        })
    }

    fn jane_request() -> ContactRequest {
        ContactRequest {
            name: "Jane Doe".try_into().unwrap(),
            email: "jane@example.com".parse().unwrap(),
            subject: "Quote request".try_into().unwrap(),
            message: "Need rates for\nLondon to Tokyo".try_into().unwrap(),
        }
    }

    fn post(body: Value) -> Request<Body> {
        Request::post("/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let service = MockContactFeatureService::new().with_submit(
            jane_request(),
            Ok(DeliveryReceipt::new("<1@example.com>")),
        );
        let sut = router(service.into());

        // Act
        let response = sut.oneshot(post(jane())).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({"success": true, "messageId": "<1@example.com>"})
        );
    }

    #[tokio::test]
    async fn delivery_failed() {
        // Arrange
        let service = MockContactFeatureService::new()
            .with_submit(jane_request(), Err(ContactSubmitError::DeliveryFailed));
        let sut = router(service.into());

        // Act
        let response = sut.oneshot(post(jane())).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({"detail": "Failed to send email"})
        );
    }

    #[tokio::test]
    async fn invalid_email() {
        // Arrange
        let sut = router(MockContactFeatureService::new().into());
        let mut body = jane();
        body["email"] = json!("not an email");

        // Act
        let response = sut.oneshot(post(body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_field() {
        // Arrange
        let sut = router(MockContactFeatureService::new().into());
        let mut body = jane();
        body.as_object_mut().unwrap().remove("subject");

        // Act
        let response = sut.oneshot(post(body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn multiline_name_is_flattened() {
        // Arrange
        let service = MockContactFeatureService::new().with_submit(
            jane_request(),
            Ok(DeliveryReceipt::new("<1@example.com>")),
        );
        let sut = router(service.into());
        let mut body = jane();
        body["name"] = json!("Jane\nDoe");

        // Act
        let response = sut.oneshot(post(body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn blank_name() {
        // Arrange
        let sut = router(MockContactFeatureService::new().into());
        let mut body = jane();
        body["name"] = json!("   ");

        // Act
        let response = sut.oneshot(post(body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
