//! Metrics collection and exposition.
//!
//! # Metrics
//! - `openboard_proxy_requests_total` (counter): relayed requests by method, status
//! - `openboard_proxy_request_duration_seconds` (histogram): relay latency
//! - `openboard_waitlist_submissions_total` (counter): submissions by outcome
//! - `openboard_mode_switches_total` (counter): override writes by mode

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, target: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("target", target.to_string()),
    ];
    metrics::counter!("openboard_proxy_requests_total", &labels).increment(1);
    metrics::histogram!("openboard_proxy_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_waitlist(outcome: &'static str) {
    metrics::counter!("openboard_waitlist_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_mode_switch(mode: &'static str) {
    metrics::counter!("openboard_mode_switches_total", "mode" => mode).increment(1);
}
