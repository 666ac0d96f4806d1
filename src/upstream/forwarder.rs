//! Same-origin relay to the upstream backend.
//!
//! # Responsibilities
//! - Rebuild the target URL from the API base, sub-path and query string
//! - Relay method, content-type and body unchanged
//! - Return upstream status, content-type and body verbatim
//!
//! # Design Decisions
//! - One call, no retries: this is a pass-through, not a resilient client
//! - Upstream error statuses are data, not failures
//! - Only transport failures surface as `ForwardError::Network`

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::upstream::base::{ApiBase, Unconfigured};

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// An inbound request bound for the upstream.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    /// Path below the proxy prefix, e.g. `projects/42`.
    pub sub_path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// What the upstream answered.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        (self.status, [(CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("API base not configured")]
    Unconfigured,

    #[error("upstream request failed: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<Unconfigured> for ForwardError {
    fn from(_: Unconfigured) -> Self {
        ForwardError::Unconfigured
    }
}

/// Relays requests to `{api_base}/{sub_path}`.
#[derive(Debug, Clone)]
pub struct Forwarder {
    base: Option<ApiBase>,
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new(base: Option<ApiBase>, client: reqwest::Client) -> Self {
        Self { base, client }
    }

    pub fn is_configured(&self) -> bool {
        self.base.is_some()
    }

    /// Target URL for a sub-path and optional query.
    pub fn target_url(&self, sub_path: &str, query: Option<&str>) -> Result<String, ForwardError> {
        let base = self.base.as_ref().ok_or(Unconfigured)?;
        let mut url = base.join(sub_path);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(q);
        }
        Ok(url)
    }

    /// Perform exactly one upstream call.
    pub async fn forward(&self, req: ForwardRequest) -> Result<UpstreamResponse, ForwardError> {
        let url = self.target_url(&req.sub_path, req.query.as_deref())?;
        let content_type = req
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        tracing::debug!(method = %req.method, url = %url, "Forwarding to upstream");

        let response = self
            .client
            .request(req.method, &url)
            .header(CONTENT_TYPE, content_type)
            .body(req.body)
            .send()
            .await
            .map_err(ForwardError::Network)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        let body = response.bytes().await.map_err(ForwardError::Network)?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(method: Method, sub_path: &str) -> ForwardRequest {
        ForwardRequest {
            method,
            sub_path: sub_path.to_string(),
            query: None,
            content_type: None,
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_target_url_keeps_query() {
        let forwarder = Forwarder::new(ApiBase::resolve(Some("http://up.example/")), reqwest::Client::new());
        assert_eq!(
            forwarder.target_url("projects/7", Some("tag=rust&page=2")).unwrap(),
            "http://up.example/projects/7?tag=rust&page=2"
        );
        assert_eq!(
            forwarder.target_url("projects", Some("")).unwrap(),
            "http://up.example/projects"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_makes_no_call() {
        let forwarder = Forwarder::new(None, reqwest::Client::new());
        let err = forwarder.forward(request(Method::GET, "projects")).await.unwrap_err();
        assert!(matches!(err, ForwardError::Unconfigured));
    }

    #[tokio::test]
    async fn test_relays_post_body_and_status() {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/waitlist"))
            .and(query_param("source", "landing"))
            .and(header("content-type", "application/json"))
            .and(body_string(r#"{"name":"Ana"}"#))
            .respond_with(ResponseTemplate::new(201).set_body_raw(r#"{"ok":true}"#, "application/json"))
            .expect(1)
            .mount(&upstream)
            .await;

        let forwarder = Forwarder::new(ApiBase::resolve(Some(&upstream.uri())), reqwest::Client::new());
        let mut req = request(Method::POST, "waitlist");
        req.query = Some("source=landing".to_string());
        req.body = Bytes::from_static(br#"{"name":"Ana"}"#);

        let res = forwarder.forward(req).await.unwrap();
        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.content_type, "application/json");
        assert_eq!(&res.body[..], br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_upstream_errors_are_not_wrapped() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(404).set_body_raw("no such user", "text/plain"))
            .mount(&upstream)
            .await;

        let forwarder = Forwarder::new(ApiBase::resolve(Some(&upstream.uri())), reqwest::Client::new());
        let res = forwarder.forward(request(Method::GET, "profile")).await.unwrap();

        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.content_type, "text/plain");
        assert_eq!(&res.body[..], b"no such user");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = format!("http://{}", addr);
        let forwarder = Forwarder::new(ApiBase::resolve(Some(&base)), reqwest::Client::new());
        let err = forwarder.forward(request(Method::GET, "projects")).await.unwrap_err();
        assert!(matches!(err, ForwardError::Network(_)));
    }
}
