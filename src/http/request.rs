//! Request identification.
//!
//! # Responsibilities
//! - Name the request ID header shared by the ID layers
//! - Build the tracing span each request is handled in
//!
//! # Design Decisions
//! - Request ID is assigned (or accepted from the client) before tracing,
//!   so every log line inside the span carries it
//! - The same ID is echoed back on the response

use axum::{body::Body, http::Request};
use tracing::Span;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Span for one request, tagged with its ID, method and path.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
