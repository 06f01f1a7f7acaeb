//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_forward_total` (counter): forwards by route and outcome
//! - `gateway_forward_duration_seconds` (histogram): forward latency by route
//!
//! Recording is a no-op until a recorder is installed, so unit tests and
//! deployments without the exporter pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one forward outcome.
///
/// `route` is the configured logical path, or "none" for unmatched requests,
/// so label cardinality stays bounded by the route table.
pub fn record_forward(route: &str, outcome: &'static str, started: Instant) {
    let route = route.to_string();
    counter!("gateway_forward_total", "route" => route.clone(), "outcome" => outcome).increment(1);
    histogram!("gateway_forward_duration_seconds", "route" => route).record(started.elapsed().as_secs_f64());
}
