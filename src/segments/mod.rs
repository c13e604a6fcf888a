//! Segment rules subsystem.
//!
//! # Data Flow
//! ```text
//! Segment label (from the customer record)
//!     → rules.rs (classify into a Tier)
//!     → ordered slice of RetentionOption
//!     → handlers (display order / submission check)
//! ```
//!
//! # Design Decisions
//! - Pure and total: unknown labels fall through to the lowest tier
//! - Labels match exactly (case-sensitive)
//! - Option order is part of the public contract

pub mod rules;

pub use rules::{allowed_options, RetentionOption, Tier};
