use glam::{IVec2, Vec2};

/// The slice of the grid that is visible this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    /// Camera centre after clamping to the grid.
    pub center: Vec2,
    /// Bottom-left visible tile.
    pub offset: IVec2,
    /// Number of visible tiles along each axis.
    pub size: IVec2,
    /// Render-space shift aligning window-local tile coordinates with the
    /// camera-centred projection.
    pub translation: Vec2,
    /// Visible extent in world units.
    pub view_space: Vec2,
}

impl ViewWindow {
    /// One past the top-right visible tile.
    pub fn end(&self) -> IVec2 {
        self.offset + self.size
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile.cmpge(self.offset).all() && tile.cmplt(self.end()).all()
    }

    pub fn tile_count(&self) -> usize {
        self.size.x.max(0) as usize * self.size.y.max(0) as usize
    }
}

/// Clamp a requested tile window to the grid: at least one tile, at most the
/// grid dimension, and zero along an axis the grid does not have.
pub fn clamp_view_size(view_size: IVec2, grid: IVec2) -> IVec2 {
    IVec2::new(
        clamp_size_axis(view_size.x, grid.x),
        clamp_size_axis(view_size.y, grid.y),
    )
}

fn clamp_size_axis(size: i32, grid: i32) -> i32 {
    if grid <= 0 { 0 } else { size.clamp(1, grid) }
}

/// Keep the camera far enough from the grid edges that the visible extent
/// stays on the grid.
///
/// When the extent is larger than the grid along an axis there is no valid
/// position, and the camera is centred on the grid along that axis instead.
pub fn clamp_center(center: Vec2, view_space: Vec2, grid: IVec2) -> Vec2 {
    Vec2::new(
        clamp_center_axis(center.x, view_space.x, grid.x),
        clamp_center_axis(center.y, view_space.y, grid.y),
    )
}

fn clamp_center_axis(center: f32, space: f32, grid: i32) -> f32 {
    let half = space / 2.0;
    let low = half;
    let high = grid as f32 - half;
    if low > high {
        grid as f32 / 2.0
    } else {
        center.clamp(low, high)
    }
}

/// Select the visible tile window for a camera.
///
/// `view_size` is the padded tile count the renderer walks; it is clamped to
/// the grid before the offset is, so `0 <= offset` and
/// `offset + size <= grid` hold on both axes.
pub fn compute_view_window(
    center: Vec2,
    view_space: Vec2,
    view_size: IVec2,
    grid: IVec2,
) -> ViewWindow {
    let size = clamp_view_size(view_size, grid);
    let center = clamp_center(center, view_space, grid);
    let corner = (center - view_space / 2.0).floor().as_ivec2();
    let max_offset = (grid - size).max(IVec2::ZERO);
    let offset = corner.clamp(IVec2::ZERO, max_offset);
    let translation = offset.as_vec2() - center;

    ViewWindow {
        center,
        offset,
        size,
        translation,
        view_space,
    }
}
