//! Request-scoped context.
//!
//! # Responsibilities
//! - Expose the request ID set by `SetRequestIdLayer`
//! - Resolve the data mode for a request from its cookies
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Mode is resolved once per request and never changes mid-request

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::http::server::AppState;
use crate::mode::RequestMode;

pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID header, or `unknown`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

impl FromRequestParts<AppState> for RequestMode {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(RequestMode::from_headers(&parts.headers, state.default_mode))
    }
}
