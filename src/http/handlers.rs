//! Route handlers.
//!
//! # Routes
//! - `GET /api/datamode`: effective mode for the caller
//! - `POST /api/datamode`: set the override cookie
//! - `GET /api/projects`, `GET /api/profile`: facade reads
//! - `POST /api/waitlist`: submission endpoint
//! - `ANY {proxy_prefix}/*path`: same-origin relay
//! - `GET /api/status`: version and configuration summary

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::datasource::{Ack, DataError, Profile, Project};
use crate::http::request::request_id;
use crate::http::response::error_response;
use crate::http::server::AppState;
use crate::mode::{override_cookie, DataMode, ModeProvider, RequestMode};
use crate::observability::metrics;
use crate::upstream::ForwardRequest;
use crate::waitlist::{WaitlistError, WaitlistSubmission};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModeStatus {
    pub mode: DataMode,
    pub overridden: bool,
}

#[derive(Deserialize)]
struct ModeChange {
    mode: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub default_mode: DataMode,
    pub api_configured: bool,
    pub use_proxy: bool,
    pub notifier: String,
}

pub async fn get_mode(mode: RequestMode) -> Json<ModeStatus> {
    Json(ModeStatus {
        mode: mode.resolve(),
        overridden: mode.is_overridden(),
    })
}

/// Body `{ "mode": "mock" | "api" }`. Anything else is a 400 and no cookie.
pub async fn set_mode(jar: CookieJar, body: Bytes) -> Response {
    let requested = serde_json::from_slice::<ModeChange>(&body)
        .ok()
        .and_then(|change| DataMode::parse_override(&change.mode));

    let Some(mode) = requested else {
        return error_response(StatusCode::BAD_REQUEST, "invalid mode");
    };

    metrics::record_mode_switch(mode.as_str());
    tracing::info!(mode = %mode, "Data mode override set");

    (
        jar.add(override_cookie(mode)),
        Json(serde_json::json!({ "ok": true, "mode": mode })),
    )
        .into_response()
}

pub async fn list_projects(State(state): State<AppState>, mode: RequestMode) -> Result<Json<Vec<Project>>, DataError> {
    Ok(Json(state.datasource.list_projects(&mode).await?))
}

/// `null` when the backend has no profile.
pub async fn get_profile(State(state): State<AppState>, mode: RequestMode) -> Result<Json<Option<Profile>>, DataError> {
    Ok(Json(state.datasource.get_profile(&mode).await?))
}

pub async fn submit_waitlist(
    State(state): State<AppState>,
    mode: RequestMode,
    body: Bytes,
) -> Result<Json<Ack>, WaitlistError> {
    let submission = WaitlistSubmission::parse(&body)?;
    let outcome = state.waitlist.submit(mode.resolve(), &submission).await?;
    Ok(Json(outcome.ack()))
}

/// Relay `{proxy_prefix}/{sub_path}` to `{api_base}/{sub_path}`.
pub async fn proxy(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();

    // Taken from the raw path so encoded and repeated separators survive.
    let sub_path = parts
        .uri
        .path()
        .strip_prefix(&*state.proxy_prefix)
        .unwrap_or_default()
        .trim_start_matches('/')
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        sub_path = %sub_path,
        "Proxying request"
    );

    if let Err(rejection) = state.policy.check(&sub_path) {
        tracing::warn!(request_id = %request_id, sub_path = %sub_path, reason = ?rejection, "Proxy path rejected");
        let response = rejection.into_response();
        metrics::record_request(method.as_str(), response.status().as_u16(), "rejected", start);
        return response;
    }

    let body = match axum::body::to_bytes(body, state.config.security.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            return error_response(StatusCode::BAD_REQUEST, "failed to read request body");
        }
    };

    let forward = ForwardRequest {
        method: method.clone(),
        sub_path,
        query: parts.uri.query().map(str::to_string),
        content_type: parts.headers.get(CONTENT_TYPE).cloned(),
        body,
    };

    let response = match state.forwarder.forward(forward).await {
        Ok(upstream) => upstream.into_response(),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Proxy forwarding failed");
            e.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), "upstream", start);
    response
}

pub async fn status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        default_mode: state.default_mode,
        api_configured: state.forwarder.is_configured(),
        use_proxy: state.config.data.use_proxy,
        notifier: state.waitlist.notifier_kind().to_string(),
    })
}
