//! Customer dataset subsystem.
//!
//! # Data Flow
//! ```text
//! df_ui.csv (produced upstream)
//!     → loader.rs (parse, normalize id column, drop bad ids)
//!     → record.rs (resolve Segment / Pred_Repurchase_Count defaults)
//!     → CustomerIndex (immutable, id → record)
//!     → shared via Arc with every handler
//! ```
//!
//! # Design Decisions
//! - Loaded exactly once at startup; failure is fatal
//! - Defaults are resolved at load time, never downstream
//! - No locking: the index is never mutated after construction

pub mod loader;
pub mod record;

pub use loader::{load, CustomerIndex, DatasetError};
pub use record::CustomerRecord;
