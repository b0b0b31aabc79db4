//! Shared tile types for the tileworld crates.

mod types;

pub use types::{ATLAS_CELLS, MARKER_TILE, NO_TILE, TileId, TileKind, atlas_cell};

pub fn crate_info() -> &'static str {
    "tileworld-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
