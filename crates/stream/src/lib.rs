//! Streaming: which part of the grid is on screen this frame.
//!
//! # Invariants
//! - A [`ViewWindow`] never reaches past the grid: `0 <= offset` and
//!   `offset + size <= grid` on both axes, for any camera centre.
//! - The camera's stored centre is unclamped; only derived windows are.
//! - Picking and drawing agree: the tile under a pixel is the tile drawn there.

mod camera;
mod viewport;

pub use camera::{Camera, CameraSettings, VIEW_PADDING};
pub use viewport::{ViewWindow, clamp_center, clamp_view_size, compute_view_window};

pub fn crate_info() -> &'static str {
    "tileworld-stream v0.1.0"
}
