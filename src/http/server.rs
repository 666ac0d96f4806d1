//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, headers)
//! - Build shared state from configuration
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::HeaderName;
use axum::routing::{any, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::datasource::DataSource;
use crate::http::handlers;
use crate::http::request::{request_id, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::mode::DataMode;
use crate::routing::ProxyPathPolicy;
use crate::security;
use crate::upstream::{Endpoints, Forwarder};
use crate::waitlist::{notifier_from_config, Notifier, WaitlistService};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Process default, fixed at startup.
    pub default_mode: DataMode,
    /// Proxy prefix without a trailing slash.
    pub proxy_prefix: Arc<str>,
    pub forwarder: Arc<Forwarder>,
    pub policy: Arc<ProxyPathPolicy>,
    pub datasource: Arc<DataSource>,
    pub waitlist: Arc<WaitlistService>,
}

impl AppState {
    /// State with the notifier selected from the mail settings.
    pub fn from_config(config: AppConfig) -> Self {
        let client = reqwest::Client::new();
        let notifier = notifier_from_config(&config.mail, client.clone());
        Self::with_notifier(config, client, notifier)
    }

    pub fn with_notifier(config: AppConfig, client: reqwest::Client, notifier: Arc<dyn Notifier>) -> Self {
        let endpoints = Endpoints::from_config(&config);
        let forwarder = Forwarder::new(config.api_base(), client.clone());
        let policy = ProxyPathPolicy::from_prefixes(&config.proxy.allowed_prefixes);
        let datasource = DataSource::new(endpoints.clone(), client.clone());
        let waitlist = WaitlistService::new(endpoints, client, notifier);

        Self {
            default_mode: config.default_mode(),
            proxy_prefix: Arc::from(config.data.proxy_prefix.trim_end_matches('/')),
            forwarder: Arc::new(forwarder),
            policy: Arc::new(policy),
            datasource: Arc::new(datasource),
            waitlist: Arc::new(waitlist),
            config: Arc::new(config),
        }
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();
    let x_request_id = HeaderName::from_static(X_REQUEST_ID);
    let proxy_route = format!("{}/{{*path}}", state.proxy_prefix);

    let router = Router::new()
        .route("/api/datamode", get(handlers::get_mode).post(handlers::set_mode))
        .route("/api/projects", get(handlers::list_projects))
        .route("/api/profile", get(handlers::get_profile))
        .route("/api/waitlist", post(handlers::submit_waitlist))
        .route("/api/status", get(handlers::status))
        .route(&proxy_route, any(handlers::proxy))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %request_id(req.headers()),
            )
        }))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    if config.security.enable_headers {
        security::headers::apply(router)
    } else {
        router
    }
}

/// HTTP server for the OpenBoard data layer.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self::with_state(AppState::from_config(config))
    }

    pub fn with_state(state: AppState) -> Self {
        let config = state.config.clone();
        Self {
            router: build_router(state),
            config,
        }
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown_rx: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            default_mode = %self.config.default_mode(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
