use glam::{IVec2, Vec2};
use tileworld_input::PanDirection;

use crate::viewport::{ViewWindow, clamp_view_size, compute_view_window};

/// Tiles added around the visible extent so partially visible edge tiles
/// are still drawn.
pub const VIEW_PADDING: i32 = 2;

/// Tunables for camera motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Screen pixels per world unit (one tile).
    pub pixels_per_unit: f32,
    /// World units the camera moves per tick while a pan key is held.
    pub pan_step: f32,
    /// Speed multiplier while boosting.
    pub boost: f32,
    /// Speed multiplier while creeping.
    pub creep: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pixels_per_unit: 64.0,
            pan_step: 1.0 / 8.0,
            boost: 12.0,
            creep: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    pixel: IVec2,
    center: Vec2,
}

/// A 2D camera over a tile grid.
///
/// The stored centre follows input freely; clamping to the grid happens when
/// a [`ViewWindow`] is derived from it.
#[derive(Debug, Clone)]
pub struct Camera {
    settings: CameraSettings,
    center: Vec2,
    display_size: IVec2,
    view_space: Vec2,
    view_size: IVec2,
    pan: Vec2,
    multiplier: f32,
    drag: Option<DragAnchor>,
}

impl Camera {
    /// A camera centred on the grid with no display attached yet.
    pub fn new(settings: CameraSettings, grid: IVec2) -> Self {
        Self {
            settings,
            center: (grid / 2).as_vec2(),
            display_size: IVec2::ZERO,
            view_space: Vec2::ZERO,
            view_size: clamp_view_size(IVec2::splat(VIEW_PADDING), grid),
            pan: Vec2::ZERO,
            multiplier: 1.0,
            drag: None,
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn display_size(&self) -> IVec2 {
        self.display_size
    }

    pub fn view_space(&self) -> Vec2 {
        self.view_space
    }

    pub fn view_size(&self) -> IVec2 {
        self.view_size
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Recompute the visible extent for a new drawable size.
    pub fn resize(&mut self, width: u32, height: u32, grid: IVec2) {
        self.display_size = IVec2::new(width as i32, height as i32);
        self.view_space = self.display_size.as_vec2() / self.settings.pixels_per_unit;
        let padded = self.view_space.ceil().as_ivec2() + IVec2::splat(VIEW_PADDING);
        self.view_size = clamp_view_size(padded, grid);
    }

    /// Start moving in `direction` on every tick until released.
    pub fn press_pan(&mut self, direction: PanDirection) {
        let step = self.settings.pan_step;
        match direction {
            PanDirection::Left => self.pan.x = -step,
            PanDirection::Right => self.pan.x = step,
            PanDirection::Up => self.pan.y = step,
            PanDirection::Down => self.pan.y = -step,
        }
    }

    /// Stop moving in `direction`. Releasing a key does not cancel motion in
    /// the opposite direction started by a later press.
    pub fn release_pan(&mut self, direction: PanDirection) {
        match direction {
            PanDirection::Left if self.pan.x < 0.0 => self.pan.x = 0.0,
            PanDirection::Right if self.pan.x > 0.0 => self.pan.x = 0.0,
            PanDirection::Up if self.pan.y > 0.0 => self.pan.y = 0.0,
            PanDirection::Down if self.pan.y < 0.0 => self.pan.y = 0.0,
            _ => {}
        }
    }

    pub fn boost(&mut self) {
        self.multiplier = self.settings.boost;
    }

    pub fn creep(&mut self) {
        self.multiplier = self.settings.creep;
    }

    pub fn release_boost(&mut self) {
        if self.multiplier > 1.0 {
            self.multiplier = 1.0;
        }
    }

    pub fn release_creep(&mut self) {
        if self.multiplier < 1.0 {
            self.multiplier = 1.0;
        }
    }

    /// Advance one tick of held-key panning. A drag in progress owns the
    /// camera, so key panning is suspended until it ends.
    pub fn update(&mut self) {
        if self.drag.is_none() {
            self.center += self.pan * self.multiplier;
        }
    }

    pub fn begin_drag(&mut self, pixel: IVec2) {
        self.drag = Some(DragAnchor {
            pixel,
            center: self.center,
        });
    }

    /// Move the camera so the world point under the drag anchor follows the
    /// pointer.
    pub fn drag_to(&mut self, pixel: IVec2) {
        let Some(anchor) = self.drag else {
            return;
        };
        let moved = (anchor.pixel - pixel).as_vec2() / self.settings.pixels_per_unit;
        self.center = anchor.center + Vec2::new(moved.x, -moved.y);
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// The clamped visible window over a grid of `grid` tiles.
    pub fn view_window(&self, grid: IVec2) -> ViewWindow {
        compute_view_window(self.center, self.view_space, self.view_size, grid)
    }

    /// Convert a window pixel (top-left origin) to the tile under it.
    pub fn screen_to_tile(&self, pixel: IVec2, grid: IVec2) -> Option<IVec2> {
        let window = self.view_window(grid);
        let flipped = IVec2::new(pixel.x, self.display_size.y - 1 - pixel.y);
        let world =
            window.center - window.view_space / 2.0 + flipped.as_vec2() / self.settings.pixels_per_unit;
        let tile = world.floor().as_ivec2();
        let on_grid = tile.cmpge(IVec2::ZERO).all() && tile.cmplt(grid).all();
        on_grid.then_some(tile)
    }

    /// The window pixel over the centre of `tile`. May lie off screen.
    pub fn tile_to_screen(&self, tile: IVec2, grid: IVec2) -> IVec2 {
        let window = self.view_window(grid);
        let world = tile.as_vec2() + Vec2::splat(0.5);
        let flipped = ((world - window.center + window.view_space / 2.0)
            * self.settings.pixels_per_unit)
            .floor()
            .as_ivec2();
        IVec2::new(flipped.x, self.display_size.y - 1 - flipped.y)
    }
}
