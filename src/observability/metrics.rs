//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalog_http_requests_total` (counter): requests by method, route, status
//! - `catalog_http_request_duration_seconds` (histogram): latency by method, route
//! - `catalog_products` (gauge): records currently in the store
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op, so tests need no setup
//! - Route label is the matched pattern (`/api/products/{id}`), not the raw path

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
    ];
    metrics::counter!(
        "catalog_http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("catalog_http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current number of stored products.
pub fn record_product_count(count: usize) {
    metrics::gauge!("catalog_products").set(count as f64);
}

/// Middleware recording request count and latency per route.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
