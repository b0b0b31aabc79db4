//! wgpu render backend for the tile viewer.
//!
//! Draws the visible window as textured quads sampled from a procedurally
//! generated palette atlas.
//!
//! # Invariants
//! - The renderer never mutates the grid.
//! - A lost or outdated surface skips the frame; it never aborts the loop.

mod canvas;
mod renderer;
mod shaders;

pub use canvas::{CanvasError, GpuCanvas};
pub use renderer::WgpuTileRenderer;
pub use shaders::TILE_SHADER;
