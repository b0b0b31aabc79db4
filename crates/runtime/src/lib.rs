//! Runtime: the fixed-timestep event loop that drives a tile viewer.
//!
//! # Invariants
//! - Simulation ticks depend only on elapsed clock time, never on how often
//!   the loop iterates or how long rendering takes.
//! - A frame is prepared and presented only when at least one tick ran, or
//!   when the host invalidated the window (expose, resize).
//! - Stop requests are observed between iterations; a started tick or render
//!   pass always completes.
//! - A clock that runs backwards is logged and tolerated, never fatal.

mod clock;
mod handler;
mod host;
mod scheduler;
mod stats;

pub use clock::{Clock, ManualClock, SystemClock, duration_to_ticks};
pub use handler::{Dispatched, Handler, dispatch};
pub use host::{HeadlessHost, HostWindow};
pub use scheduler::{DEFAULT_IDLE_SLEEP, Iteration, Scheduler, SchedulerError};
pub use stats::LoopStats;

pub fn crate_info() -> &'static str {
    "tileworld-runtime v0.1.0"
}
