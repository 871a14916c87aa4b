use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use meridian_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse { http: true, email };

    (status, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use meridian_core_health_contracts::MockHealthFeatureService;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    async fn get_health(status: HealthStatus) -> (StatusCode, serde_json::Value) {
        let service = MockHealthFeatureService::new().with_get_status(status);
        let response = router(service.into())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn healthy() {
        let (status, body) = get_health(HealthStatus { email: true }).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"http": true, "email": true}));
    }

    #[tokio::test]
    async fn smtp_unreachable() {
        let (status, body) = get_health(HealthStatus { email: false }).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"http": true, "email": false}));
    }
}
