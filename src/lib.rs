//! RFM customer segment and retention choice service library.

pub mod choices;
pub mod config;
pub mod dataset;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod segments;

pub use config::schema::ServiceConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
