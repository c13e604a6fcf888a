//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Serve on a bound listener until shutdown is signalled

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::choices::ChoiceLog;
use crate::config::ServiceConfig;
use crate::dataset::CustomerIndex;
use crate::http::handlers;
use crate::http::middleware::track_metrics;
use crate::http::request::make_request_span;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Customer index loaded at startup. `None` only when a server is
    /// deliberately built without a dataset.
    pub customers: Option<Arc<CustomerIndex>>,
    pub choices: Arc<ChoiceLog>,
}

impl AppState {
    pub fn new(customers: CustomerIndex, choices: ChoiceLog) -> Self {
        Self {
            customers: Some(Arc::new(customers)),
            choices: Arc::new(choices),
        }
    }

    /// State with no customer dataset: customer lookups fail with 500 and
    /// submissions with 404.
    pub fn without_dataset(choices: ChoiceLog) -> Self {
        Self {
            customers: None,
            choices: Arc::new(choices),
        }
    }
}

/// HTTP server for the choice service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/customer/{customer_id}", get(handlers::get_customer))
            .route("/choice", post(handlers::submit_choice))
            .route("/choice/latest/{customer_id}", get(handlers::get_latest_choice))
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            data_root = %self.config.data.root.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
