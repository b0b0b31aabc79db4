use glam::{Mat4, Vec2};
use tileworld_common::{TileId, TileKind};
use tileworld_stream::ViewWindow;

use crate::buffer::RenderGridBuffer;

/// Projection for the visible window: world units map to clip space with
/// the camera centre at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Half of the visible extent in world units.
    pub half_space: Vec2,
    /// Shift from window-local tile coordinates to camera-relative ones.
    pub translation: Vec2,
}

impl RenderView {
    pub fn from_window(window: &ViewWindow) -> Self {
        Self {
            half_space: window.view_space / 2.0,
            translation: window.translation,
        }
    }

    pub fn projection(&self) -> Mat4 {
        let h = self.half_space;
        if h.x <= 0.0 || h.y <= 0.0 {
            return Mat4::IDENTITY;
        }
        Mat4::orthographic_rh(-h.x, h.x, -h.y, h.y, -1.0, 1.0)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(self.translation.extend(0.0))
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Renderer-agnostic interface. The viewer uploads the visible geometry
/// whenever the view changes and draws once per rendered frame.
///
/// Renderers only read tile data; the grid is owned by the viewer.
pub trait TileRenderer {
    /// Surface the renderer draws into, supplied by the host.
    type Canvas;

    /// Acquire canvas-dependent resources. Called once before the first frame.
    fn open(&mut self, canvas: &mut Self::Canvas);

    fn upload(&mut self, buffer: &RenderGridBuffer);

    fn draw(&mut self, canvas: &mut Self::Canvas, view_proj: Mat4);
}

/// Draws the uploaded window as ASCII art, top row first.
///
/// `#` fill, `^` surface, `*` marker, `?` anything else, `.` empty.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    size: (usize, usize),
    rows: Vec<Vec<u8>>,
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn glyph(tile: TileId) -> u8 {
        match TileKind::of(tile) {
            TileKind::Empty => b'.',
            TileKind::Surface => b'^',
            TileKind::Fill => b'#',
            TileKind::Marker => b'*',
            TileKind::Other => b'?',
        }
    }
}

impl TileRenderer for DebugTextRenderer {
    type Canvas = String;

    fn open(&mut self, canvas: &mut String) {
        canvas.clear();
    }

    fn upload(&mut self, buffer: &RenderGridBuffer) {
        let size = buffer
            .window()
            .map(|w| w.size.max(glam::IVec2::ZERO).as_uvec2())
            .unwrap_or_default();
        let (width, height) = (size.x as usize, size.y as usize);
        self.size = (width, height);
        self.rows = vec![vec![b'.'; width]; height];
        for cell in buffer.cells() {
            let (x, y) = (cell.local.x as usize, cell.local.y as usize);
            if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *slot = Self::glyph(cell.tile);
            }
        }
    }

    fn draw(&mut self, canvas: &mut String, _view_proj: Mat4) {
        canvas.clear();
        for row in self.rows.iter().rev() {
            canvas.extend(row.iter().map(|&b| b as char));
            canvas.push('\n');
        }
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, Vec4};
    use tileworld_common::MARKER_TILE;
    use tileworld_kernel::TileGrid;
    use tileworld_stream::compute_view_window;

    fn window_over(grid: &TileGrid) -> ViewWindow {
        let extent = grid.extent();
        compute_view_window(extent.as_vec2() / 2.0, extent.as_vec2(), extent, extent)
    }

    #[test]
    fn text_renderer_draws_top_row_first() {
        let mut grid = TileGrid::new(3, 2);
        grid.set(IVec2::new(0, 0), 0x10).unwrap();
        grid.set(IVec2::new(0, 1), 0x00).unwrap();
        grid.set(IVec2::new(2, 0), MARKER_TILE).unwrap();

        let mut buffer = RenderGridBuffer::new();
        buffer.generate(&grid, &window_over(&grid));

        let mut renderer = DebugTextRenderer::new();
        let mut canvas = String::from("stale");
        renderer.open(&mut canvas);
        assert!(canvas.is_empty());
        renderer.upload(&buffer);
        renderer.draw(&mut canvas, Mat4::IDENTITY);

        assert_eq!(canvas, "^..\n#.*\n");
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn draw_before_upload_is_empty() {
        let mut renderer = DebugTextRenderer::new();
        let mut canvas = String::new();
        renderer.draw(&mut canvas, Mat4::IDENTITY);
        assert!(canvas.is_empty());
    }

    #[test]
    fn camera_centre_projects_to_clip_origin() {
        let window = compute_view_window(
            Vec2::new(40.5, 20.25),
            Vec2::new(16.0, 12.0),
            IVec2::new(18, 14),
            IVec2::new(256, 128),
        );
        let vp = RenderView::from_window(&window).view_projection();

        let centre_local = window.center - window.offset.as_vec2();
        let clip = vp * Vec4::new(centre_local.x, centre_local.y, 0.0, 1.0);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5, "{clip:?}");

        let corner_local = centre_local - window.view_space / 2.0;
        let clip = vp * Vec4::new(corner_local.x, corner_local.y, 0.0, 1.0);
        assert!((clip.x + 1.0).abs() < 1e-5 && (clip.y + 1.0).abs() < 1e-5, "{clip:?}");
    }

    #[test]
    fn zero_extent_projection_is_identity() {
        let view = RenderView {
            half_space: Vec2::ZERO,
            translation: Vec2::ZERO,
        };
        assert_eq!(view.projection(), Mat4::IDENTITY);
    }
}
