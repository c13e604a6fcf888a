//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Load dataset → Ensure choice log → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then data, then listener
//! - Any startup failure exits non-zero before traffic is accepted

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
