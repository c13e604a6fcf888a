//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → middleware/ (metrics)
//!     → extract.rs (path/body decoding, rejections as ApiError)
//!     → handlers.rs (dataset lookup, segment rules, choice log)
//!     → error.rs (ApiError → status + {"detail": ...})
//!     → Send to client
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
