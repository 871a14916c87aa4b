//! Assign each request an id and echo it in the `X-Request-Id` header

use std::sync::Arc;

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    Router,
};
use base64::{display::Base64Display, engine::general_purpose::STANDARD_NO_PAD};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const MAX_FORWARDED_LEN: usize = 64;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(mut request: Request, next: Next) -> Response {
    let request_id =
        RequestId::forwarded(request.headers()).unwrap_or_else(RequestId::generate);
    request.extensions_mut().insert(request_id.clone());
    let response = next.run(request).await;
    ([(REQUEST_ID_HEADER, request_id.to_string())], response).into_response()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(Arc<str>);

impl RequestId {
    fn generate() -> Self {
        let id = Uuid::now_v7();
        Self(Base64Display::new(id.as_bytes(), &STANDARD_NO_PAD).to_string().into())
    }

    /// Reuse the id a reverse proxy assigned to the request, if it is short
    /// and only contains characters that are safe to log.
    fn forwarded(headers: &HeaderMap) -> Option<Self> {
        let id = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
        let valid = !id.is_empty()
            && id.len() <= MAX_FORWARDED_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"-_.+/=".contains(&b));
        valid.then(|| Self(id.into()))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
