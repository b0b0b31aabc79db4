//! Viewer: configuration and the event handler that turns a generated tile
//! grid into an interactive, scrollable view.
//!
//! # Invariants
//! - The viewer owns the grid, camera, edit history and render buffer.
//! - Terrain is a pure function of the configured size, step and seed; the
//!   seed is always logged so a session can be reproduced.

mod config;
mod viewer;

pub use config::{ConfigError, ViewerConfig};
pub use viewer::TileViewer;

pub fn crate_info() -> &'static str {
    "tileworld-viewer v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("viewer"));
    }
}
