//! Metrics collection and exposition.
//!
//! # Metrics
//! - `maintenance_requests_total` (counter): requests seen by the middleware,
//!   labelled `outcome` (`passed`, `blocked`, `error`) and `reason`
//! - `maintenance_state` (gauge): 1 while maintenance is active, else 0
//!
//! Recording is a no-op until a recorder is installed, so library users who
//! never call [`init_metrics`] pay nothing.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_passed() {
    metrics::counter!("maintenance_requests_total", "outcome" => "passed", "reason" => "none")
        .increment(1);
}

pub fn record_blocked(reason: &'static str) {
    metrics::counter!("maintenance_requests_total", "outcome" => "blocked", "reason" => reason)
        .increment(1);
}

pub fn record_state_error() {
    metrics::counter!("maintenance_requests_total", "outcome" => "error", "reason" => "state_read")
        .increment(1);
}

pub fn record_state(active: bool) {
    metrics::gauge!("maintenance_state").set(if active { 1.0 } else { 0.0 });
}
