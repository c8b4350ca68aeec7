//! Metrics collection and exposition.
//!
//! # Metrics
//! - `posts_requests_total` (counter): requests by endpoint, method, status
//! - `posts_request_duration_seconds` (histogram): handler latency by endpoint
//! - `posts_stored` (gauge): posts currently held by the store
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op (tests, metrics disabled)
//! - Prometheus exporter serves its own scrape listener
//! - Label values come from closed sets; extension methods collapse to `other`

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Label for a request method. Anything outside the standard set is `other`.
pub fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        Method::CONNECT => "CONNECT",
        Method::PATCH => "PATCH",
        Method::TRACE => "TRACE",
        _ => "other",
    }
}

/// Record one finished request.
pub fn record_request(endpoint: &'static str, method: &Method, status: u16, start: Instant) {
    metrics::counter!(
        "posts_requests_total",
        "endpoint" => endpoint,
        "method" => method_label(method),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("posts_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current store size.
pub fn record_store_size(len: usize) {
    metrics::gauge!("posts_stored").set(len as f64);
}
