//! OpenBoard data layer server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / CLI                    ┌──────────────────────────────────────────┐
//!     ──────────────────────────────── │  http server (router + middleware)       │
//!        cookie ob_datamode ─────────▶ │    │                                     │
//!                                      │    ├─ /api/datamode  → mode override     │
//!                                      │    ├─ /api/projects  ┐                   │
//!                                      │    ├─ /api/profile   ┼→ datasource facade│
//!                                      │    ├─ /api/waitlist  → waitlist service  │
//!                                      │    └─ /api/proxy/*   → upstream relay ───┼──▶ API base
//!                                      │                                          │
//!                                      │  config · observability · lifecycle      │
//!                                      └──────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;

use openboard::config::load_from_env;
use openboard::lifecycle::signals::wait_for_signal;
use openboard::lifecycle::Shutdown;
use openboard::observability::{logging, metrics};
use openboard::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;
    logging::init_logging(&config.observability);

    tracing::info!("openboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        default_mode = %config.default_mode(),
        api_configured = config.api_base().is_some(),
        use_proxy = config.data.use_proxy,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
