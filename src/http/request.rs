//! Request identification and path extraction.
//!
//! # Responsibilities
//! - Attach an `x-request-id` (UUID v4) to every request and echo it back
//! - Open one tracing span per request carrying that id
//! - Parse the `{id}` path segment into a `ProductId`
//! - Resolve the origin links and `Location` headers are built against
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied `x-request-id` is kept, not replaced

use axum::{
    body::Body,
    extract::{FromRequestParts, Path},
    http::{request::Parts, HeaderName, Request},
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use std::convert::Infallible;
use tracing::Span;

use crate::catalog::ProductId;
use crate::hateoas::LinkResolver;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Header carrying the request correlation id.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer assigning a UUID request id when the client sent none.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer copying the request id onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Span for one request, used by the trace layer.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

/// Product identifier taken from the `{id}` path segment.
///
/// Anything that is not a non-negative integer is a bad request.
#[derive(Debug, Clone, Copy)]
pub struct ProductPath(pub ProductId);

impl<S> FromRequestParts<S> for ProductPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<ProductId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(id))
    }
}

impl FromRequestParts<AppState> for LinkResolver {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(state.resolver(&parts.uri, &parts.headers))
    }
}
