use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn add<S: Clone + Send + Sync + 'static>(
    router: Router<S>,
    allowed_origins: &[HeaderValue],
) -> Router<S> {
    if allowed_origins.is_empty() {
        return router;
    }

    router.layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .expose_headers([header::HeaderName::from_static("x-request-id")]),
    )
}
