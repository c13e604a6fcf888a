//! Choice log subsystem.
//!
//! # Data Flow
//! ```text
//! POST /choice (validated against segment rules)
//!     → store.rs replace(): lock → read all → drop same id → append → write all
//!     → choice_log.csv (temp file + atomic rename)
//!
//! GET /choice/latest/{id}
//!     → store.rs latest(): read all → last row for id
//! ```
//!
//! # Design Decisions
//! - One current entry per customer (replace-by-key, not history)
//! - Writes are serialized in-process; readers never take the lock
//! - The file is always replaced whole, never edited in place
//! - Several processes sharing one log file remain last-writer-wins

pub mod entry;
pub mod store;

pub use entry::ChoiceEntry;
pub use store::{ChoiceLog, ChoiceLogError};
