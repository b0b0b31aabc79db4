//! Developer Tooling: grid inspector and log-sink setup.
//!
//! # Invariants
//! - Tools only read the grid.
//! - Log sinks live in an explicit [`LogContext`] owned by `main`; nothing
//!   in the core installs or tears down a subscriber.

mod inspector;
mod logging;

pub use inspector::{ColumnInfo, GridInspector, GridSummary};
pub use logging::{LogContext, LogError, default_directive};

pub fn crate_info() -> &'static str {
    "tileworld-tools v0.1.0"
}
