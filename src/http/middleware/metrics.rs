//! Request metrics middleware.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::observability::metrics;

/// Count every request and time it, labelled by its route template.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = request.method().clone();

    let response = next.run(request).await;

    metrics::record_request(method.as_str(), &route, response.status().as_u16(), start_time);
    response
}
