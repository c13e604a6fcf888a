//! Metrics collection and exposition.
//!
//! # Metrics
//! - `choice_service_requests_total` (counter): requests by method, route, status
//! - `choice_service_request_duration_seconds` (histogram): latency by route
//! - `choice_service_choices_total` (counter): submissions by outcome
//! - `choice_service_customers_loaded` (gauge): size of the customer index
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until
//!   `init_metrics` installs the Prometheus exporter
//! - Routes are labelled by their template (`/customer/{id}`), never the raw path

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start_time: Instant) {
    counter!(
        "choice_service_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("choice_service_request_duration_seconds", "route" => route.to_string())
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a choice submission outcome ("saved", "invalid_option", "not_found", "error").
pub fn record_choice(outcome: &'static str) {
    counter!("choice_service_choices_total", "outcome" => outcome).increment(1);
}

/// Record the number of customers loaded at startup.
pub fn record_customers_loaded(count: usize) {
    gauge!("choice_service_customers_loaded").set(count as f64);
}
