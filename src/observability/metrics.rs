//! Metrics collection and exposition.
//!
//! # Metrics
//! - `component_requests_total` (counter): requests by method, route, status
//! - `component_request_duration_seconds` (histogram): latency distribution
//! - `component_extract_failures_total` (counter): rejected requests by kind
//!
//! # Design Decisions
//! - Route label uses the matched route template to bound cardinality
//! - Recording is a no-op until a recorder is installed

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one completed request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("component_requests_total", &labels).increment(1);
    metrics::histogram!("component_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request rejected during extraction.
pub fn record_extract_failure(kind: &'static str) {
    metrics::counter!("component_extract_failures_total", "kind" => kind).increment(1);
}

/// Middleware timing every routed request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    record_request(&method, &route, response.status().as_u16(), start);
    response
}
