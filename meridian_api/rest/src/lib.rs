use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use meridian_core_contact_contracts::ContactFeatureService;
use meridian_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone, Default)]
pub struct RestServerConfig {
    /// Browser origins allowed to call the api. CORS is disabled if empty.
    pub allowed_origins: Arc<[HeaderValue]>,
}

impl RestServerConfig {
    pub fn new(allowed_origins: &[impl AsRef<str>]) -> anyhow::Result<Self> {
        let allowed_origins = allowed_origins
            .iter()
            .map(|origin| {
                let origin = origin.as_ref();
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid allowed origin: {origin:?}"))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self { allowed_origins })
    }
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        axum::serve(listener, router)
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(router, &self.config.allowed_origins)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use meridian_core_contact_contracts::MockContactFeatureService;
    use meridian_core_health_contracts::MockHealthFeatureService;
    use tower::ServiceExt;

    use super::*;

    fn make_sut(allowed_origins: &[&'static str]) -> Router<()> {
        RestServer::new(
            MockHealthFeatureService::new(),
            MockContactFeatureService::new(),
            RestServerConfig {
                allowed_origins: allowed_origins
                    .iter()
                    .map(|origin| HeaderValue::from_static(origin))
                    .collect(),
            },
        )
        .router()
    }

    #[test]
    fn invalid_allowed_origin() {
        assert!(RestServerConfig::new(&["https://meridian.global"]).is_ok());
        assert!(RestServerConfig::new(&["bad\norigin"]).is_err());
    }

    #[tokio::test]
    async fn request_id_header() {
        // Act
        let response = make_sut(&[])
            .oneshot(Request::get("/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("X-Request-Id"));
    }

    #[tokio::test]
    async fn cors_preflight() {
        // Act
        let response = make_sut(&["https://meridian.global"])
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/contact")
                    .header(header::ORIGIN, "https://meridian.global")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://meridian.global"
        );
    }

    #[tokio::test]
    async fn cors_disabled() {
        // Act
        let response = make_sut(&[])
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/contact")
                    .header(header::ORIGIN, "https://meridian.global")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
