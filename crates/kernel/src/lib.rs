//! World Kernel: the authoritative tile grid and the terrain generator that fills it.
//!
//! # Invariants
//! - `tiles.len() == width * height`; the grid is never resized after creation.
//! - All reads and writes are bounds-checked.
//! - Terrain generation is a pure function of its size, parameters and RNG stream.

pub mod grid;
pub mod terrain;

pub use grid::{GridError, TileGrid};
pub use terrain::{TerrainParams, generate, generate_with};

pub fn crate_info() -> &'static str {
    "tileworld-kernel v0.1.0"
}
