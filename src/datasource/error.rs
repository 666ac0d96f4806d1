//! Error types for the data facade.

use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

use crate::upstream::Unconfigured;

#[derive(Debug, Error)]
pub enum DataError {
    /// Input failed validation. Nothing was sent anywhere.
    #[error("{0}")]
    InvalidPayload(String),

    #[error("API base not configured")]
    Unconfigured,

    /// The backend answered with a non-success status. `content_type` is
    /// `None` when `body` is an extracted error message rather than the raw body.
    #[error("upstream returned {status}: {body}")]
    Upstream {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: String,
    },

    /// The call could not complete at all.
    #[error("upstream request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl From<Unconfigured> for DataError {
    fn from(_: Unconfigured) -> Self {
        DataError::Unconfigured
    }
}
