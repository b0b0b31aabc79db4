use bytemuck::{Pod, Zeroable};
use glam::{IVec2, Vec2};
use tileworld_common::{ATLAS_CELLS, NO_TILE, TileId, TileKind, atlas_cell};
use tileworld_kernel::TileGrid;
use tileworld_stream::ViewWindow;

/// Quads are widened by this much on every side so neighbouring tiles
/// overlap instead of leaving hairline seams.
pub const QUAD_LIP: f32 = 1.0 / 1024.0;

/// Two triangles per tile.
pub const VERTICES_PER_TILE: usize = 6;

/// One vertex of a tile quad, in window-local units.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TileVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 3],
}

/// A non-empty tile inside the view window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleTile {
    /// Position relative to the window offset.
    pub local: IVec2,
    pub tile: TileId,
}

/// Geometry for the visible part of the grid, rebuilt whenever the view
/// changes. Allocations are reused between frames.
#[derive(Debug, Clone, Default)]
pub struct RenderGridBuffer {
    window: Option<ViewWindow>,
    cells: Vec<VisibleTile>,
    vertices: Vec<TileVertex>,
}

impl RenderGridBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the buffer from the tiles of `grid` inside `window`.
    pub fn generate(&mut self, grid: &TileGrid, window: &ViewWindow) {
        let _span = tracing::trace_span!("render_grid_generate").entered();
        self.cells.clear();
        self.vertices.clear();
        self.window = Some(*window);

        for x in window.offset.x..window.end().x {
            for y in window.offset.y..window.end().y {
                let pos = IVec2::new(x, y);
                let Some(tile) = grid.get(pos).filter(|&t| t != NO_TILE) else {
                    continue;
                };
                let local = pos - window.offset;
                self.cells.push(VisibleTile { local, tile });
                push_quad(&mut self.vertices, local, tile);
            }
        }
    }

    /// The window the buffer was last generated for.
    pub fn window(&self) -> Option<&ViewWindow> {
        self.window.as_ref()
    }

    pub fn cells(&self) -> &[VisibleTile] {
        &self.cells
    }

    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn tint(tile: TileId) -> [f32; 3] {
    match TileKind::of(tile) {
        TileKind::Marker => [1.0, 0.85, 0.4],
        _ => [1.0, 1.0, 1.0],
    }
}

fn push_quad(out: &mut Vec<TileVertex>, local: IVec2, tile: TileId) {
    let lo = local.as_vec2() - Vec2::splat(QUAD_LIP);
    let hi = local.as_vec2() + Vec2::splat(1.0 + QUAD_LIP);

    let cell = 1.0 / ATLAS_CELLS as f32;
    let uv = atlas_cell(tile).as_vec2() * cell;
    // Texture rows run top-down, world rows bottom-up.
    let (u0, u1) = (uv.x, uv.x + cell);
    let (v_top, v_bottom) = (uv.y, uv.y + cell);
    let color = tint(tile);

    let vertex = |x: f32, y: f32, u: f32, v: f32| TileVertex {
        position: [x, y],
        tex_coords: [u, v],
        color,
    };
    let bl = vertex(lo.x, lo.y, u0, v_bottom);
    let br = vertex(hi.x, lo.y, u1, v_bottom);
    let tr = vertex(hi.x, hi.y, u1, v_top);
    let tl = vertex(lo.x, hi.y, u0, v_top);
    out.extend_from_slice(&[bl, br, tr, bl, tr, tl]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworld_common::MARKER_TILE;
    use tileworld_stream::compute_view_window;

    fn small_grid() -> TileGrid {
        // 4x3: column x filled to height x (column 0 empty)
        let mut grid = TileGrid::new(4, 3);
        for x in 1..4 {
            for y in 0..x.min(3) {
                grid.set(IVec2::new(x, y), 0x10).unwrap();
            }
        }
        grid
    }

    fn full_window(grid: &TileGrid) -> ViewWindow {
        let extent = grid.extent();
        compute_view_window(extent.as_vec2() / 2.0, extent.as_vec2(), extent, extent)
    }

    #[test]
    fn emits_six_vertices_per_filled_tile() {
        let grid = small_grid();
        let mut buffer = RenderGridBuffer::new();
        buffer.generate(&grid, &full_window(&grid));
        assert_eq!(buffer.cells().len(), 1 + 2 + 3);
        assert_eq!(buffer.vertices().len(), buffer.cells().len() * VERTICES_PER_TILE);
        assert!(buffer.cells().iter().all(|c| c.tile != NO_TILE));
    }

    #[test]
    fn cells_are_window_local() {
        let mut grid = TileGrid::new(32, 32);
        grid.set(IVec2::new(20, 10), 0x01).unwrap();
        let window = compute_view_window(
            Vec2::new(20.0, 10.0),
            Vec2::new(8.0, 6.0),
            IVec2::new(10, 8),
            grid.extent(),
        );
        let mut buffer = RenderGridBuffer::new();
        buffer.generate(&grid, &window);
        assert_eq!(
            buffer.cells(),
            &[VisibleTile {
                local: IVec2::new(20, 10) - window.offset,
                tile: 0x01
            }]
        );
    }

    #[test]
    fn quad_covers_tile_with_lip() {
        let mut out = Vec::new();
        push_quad(&mut out, IVec2::new(2, 3), 0x00);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        let min_x = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max_x = xs.iter().cloned().fold(f32::MIN, f32::max);
        let min_y = ys.iter().cloned().fold(f32::MAX, f32::min);
        let max_y = ys.iter().cloned().fold(f32::MIN, f32::max);
        assert_eq!(min_x, 2.0 - QUAD_LIP);
        assert_eq!(max_x, 3.0 + QUAD_LIP);
        assert_eq!(min_y, 3.0 - QUAD_LIP);
        assert_eq!(max_y, 4.0 + QUAD_LIP);
    }

    #[test]
    fn tex_coords_follow_atlas_layout() {
        let mut out = Vec::new();
        push_quad(&mut out, IVec2::ZERO, 0x13);
        let cell = 1.0 / 16.0;
        // Bottom-left corner samples the bottom of cell (3, 1).
        assert_eq!(out[0].tex_coords, [3.0 * cell, 2.0 * cell]);
        // Top-right corner samples the top of the cell.
        assert_eq!(out[2].tex_coords, [4.0 * cell, cell]);
    }

    #[test]
    fn marker_tiles_are_tinted() {
        let mut out = Vec::new();
        push_quad(&mut out, IVec2::ZERO, MARKER_TILE);
        push_quad(&mut out, IVec2::ONE, 0x10);
        assert_ne!(out[0].color, out[6].color);
    }

    #[test]
    fn regenerate_replaces_previous_geometry() {
        let grid = small_grid();
        let mut buffer = RenderGridBuffer::new();
        buffer.generate(&grid, &full_window(&grid));
        buffer.generate(&TileGrid::new(4, 3), &full_window(&grid));
        assert!(buffer.is_empty());
        assert_eq!(buffer.vertex_count(), 0);
        assert!(buffer.window().is_some());
    }
}
