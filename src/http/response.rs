//! Error-to-response mapping.
//!
//! # Design Decisions
//! - Client mistakes are 400, missing configuration is 500
//! - Upstream answers are relayed, never re-wrapped
//! - Transport failures are a generic 502

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::datasource::DataError;
use crate::routing::PathRejection;
use crate::upstream::ForwardError;
use crate::waitlist::WaitlistError;

const UNCONFIGURED: &str = "API base not configured";
const NETWORK_FAILURE: &str = "upstream request failed";

/// `{ "error": message }` with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        match self {
            ForwardError::Unconfigured => error_response(StatusCode::INTERNAL_SERVER_ERROR, UNCONFIGURED),
            ForwardError::Network(e) => {
                tracing::error!(error = %e, "Upstream error");
                error_response(StatusCode::BAD_GATEWAY, NETWORK_FAILURE)
            }
        }
    }
}

impl IntoResponse for DataError {
    fn into_response(self) -> Response {
        match self {
            DataError::InvalidPayload(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            DataError::Unconfigured => error_response(StatusCode::INTERNAL_SERVER_ERROR, UNCONFIGURED),
            DataError::Upstream {
                status,
                content_type: Some(content_type),
                body,
            } => (status, [(CONTENT_TYPE, content_type)], body).into_response(),
            DataError::Upstream { status, body, .. } => (status, body).into_response(),
            DataError::Network(e) => {
                tracing::error!(error = %e, "Upstream error");
                error_response(StatusCode::BAD_GATEWAY, NETWORK_FAILURE)
            }
            DataError::MalformedResponse(e) => {
                tracing::error!(error = %e, "Malformed upstream response");
                error_response(StatusCode::BAD_GATEWAY, "malformed upstream response")
            }
        }
    }
}

impl IntoResponse for WaitlistError {
    fn into_response(self) -> Response {
        match self {
            WaitlistError::Invalid(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
            WaitlistError::Unconfigured => error_response(StatusCode::INTERNAL_SERVER_ERROR, UNCONFIGURED),
            WaitlistError::Upstream(res) => res.into_response(),
            WaitlistError::Network(e) => {
                tracing::error!(error = %e, "Upstream error");
                error_response(StatusCode::BAD_GATEWAY, NETWORK_FAILURE)
            }
        }
    }
}

impl IntoResponse for PathRejection {
    fn into_response(self) -> Response {
        match self {
            PathRejection::InvalidPath => error_response(StatusCode::BAD_REQUEST, "invalid proxy path"),
            PathRejection::NotAllowed => error_response(StatusCode::FORBIDDEN, "proxy path not allowed"),
        }
    }
}
