//! Rendering Adapter: tile geometry for the visible window and a
//! renderer-agnostic drawing interface.
//!
//! # Invariants
//! - Renderers never mutate the grid; geometry derives from grid and view.
//! - Geometry is window-local; [`RenderView`] carries the camera offset.
//!
//! A debug text renderer ships alongside the trait so headless runs and tests
//! exercise the same upload/draw path as the wgpu backend.

mod atlas;
mod buffer;
mod renderer;

pub use atlas::{ATLAS_CELL_TEXELS, ATLAS_TEXELS, atlas_pixels, tile_color};
pub use buffer::{QUAD_LIP, RenderGridBuffer, TileVertex, VERTICES_PER_TILE, VisibleTile};
pub use renderer::{DebugTextRenderer, RenderView, TileRenderer};

pub fn crate_info() -> &'static str {
    "tileworld-render v0.1.0"
}
