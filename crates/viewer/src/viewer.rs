use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tileworld_author::{TileEdit, TileEditor};
use tileworld_common::{MARKER_TILE, TileId};
use tileworld_input::{Action, Key, Modifiers, MouseButton, action_for_key};
use tileworld_kernel::{TileGrid, generate_with};
use tileworld_render::{RenderGridBuffer, RenderView, TileRenderer};
use tileworld_runtime::{Handler, LoopStats};
use tileworld_stream::{Camera, ViewWindow};
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, ViewerConfig};

/// The tile viewer: owns the grid, camera and edit history, and feeds the
/// visible window to a renderer.
pub struct TileViewer<R> {
    seed: u64,
    grid: TileGrid,
    camera: Camera,
    editor: TileEditor,
    buffer: RenderGridBuffer,
    view: Option<RenderView>,
    renderer: R,
    log_stats: bool,
    dump_view: bool,
    exit: bool,
}

impl<R: TileRenderer> TileViewer<R> {
    /// Validate `config`, generate the terrain and centre the camera on it.
    pub fn new(config: &ViewerConfig, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            seed,
            width = config.grid_width,
            height = config.grid_height,
            "generating terrain"
        );
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = generate_with(
            &config.terrain_params(),
            config.grid_width,
            config.grid_height,
            &mut rng,
        );
        let camera = Camera::new(config.camera_settings(), grid.extent());

        Ok(Self {
            seed,
            grid,
            camera,
            editor: TileEditor::new(),
            buffer: RenderGridBuffer::new(),
            view: None,
            renderer,
            log_stats: false,
            dump_view: false,
            exit: false,
        })
    }

    /// Seed the terrain was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn editor(&self) -> &TileEditor {
        &self.editor
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn stats_logging(&self) -> bool {
        self.log_stats
    }

    pub fn view_window(&self) -> ViewWindow {
        self.camera.view_window(self.grid.extent())
    }

    /// Clear the tile under a window pixel.
    pub fn erase_at(&mut self, pixel: IVec2) -> Option<TileEdit> {
        let tile = self.pick(pixel)?;
        match self.editor.erase(&mut self.grid, tile) {
            Ok(edit) => {
                if let Some(edit) = edit {
                    debug!(x = tile.x, y = tile.y, old = edit.old, "erased tile");
                }
                edit
            }
            Err(err) => {
                warn!("erase rejected: {err}");
                None
            }
        }
    }

    /// Paint `tile_id` into the tile under a window pixel.
    pub fn paint_at(&mut self, pixel: IVec2, tile_id: TileId) -> Option<TileEdit> {
        let tile = self.pick(pixel)?;
        match self.editor.paint(&mut self.grid, tile, tile_id) {
            Ok(edit) => edit,
            Err(err) => {
                warn!("paint rejected: {err}");
                None
            }
        }
    }

    fn pick(&self, pixel: IVec2) -> Option<IVec2> {
        let tile = self.camera.screen_to_tile(pixel, self.grid.extent());
        if tile.is_none() {
            warn!(x = pixel.x, y = pixel.y, "no tile under cursor");
        }
        tile
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.exit = true,
            Action::Pan(direction) => self.camera.press_pan(direction),
            Action::Boost => self.camera.boost(),
            Action::Creep => self.camera.creep(),
            Action::ToggleStats => {
                self.log_stats = !self.log_stats;
                info!(enabled = self.log_stats, "loop statistics logging");
            }
            Action::DumpView => self.dump_view = true,
            Action::Undo => match self.editor.undo(&mut self.grid) {
                Some(edit) => info!(x = edit.pos.x, y = edit.pos.y, "undo"),
                None => debug!("nothing to undo"),
            },
            Action::Redo => match self.editor.redo(&mut self.grid) {
                Some(edit) => info!(x = edit.pos.x, y = edit.pos.y, "redo"),
                None => debug!("nothing to redo"),
            },
        }
    }

    fn release(&mut self, action: Action) {
        match action {
            Action::Pan(direction) => self.camera.release_pan(direction),
            Action::Boost => self.camera.release_boost(),
            Action::Creep => self.camera.release_creep(),
            _ => {}
        }
    }
}

impl<R: TileRenderer> Handler<R::Canvas> for TileViewer<R> {
    fn on_open(&mut self, canvas: &mut R::Canvas) {
        self.renderer.open(canvas);
    }

    fn on_close(&mut self) {
        info!(
            edits = self.editor.undo_count(),
            hash = self.grid.state_hash(),
            "viewer closed"
        );
    }

    fn on_update(&mut self) {
        self.camera.update();
    }

    fn on_prepare_render(&mut self) {
        let window = self.view_window();
        self.buffer.generate(&self.grid, &window);
        self.renderer.upload(&self.buffer);
        let view = RenderView::from_window(&window);
        self.view = Some(view);

        if self.dump_view {
            self.dump_view = false;
            info!(
                half_space = ?view.half_space,
                center = ?window.center,
                translation = ?window.translation,
                offset = ?window.offset,
                size = ?window.size,
                tiles = self.buffer.cells().len(),
                "view"
            );
        }
    }

    fn on_render(&mut self, canvas: &mut R::Canvas) {
        let view = match self.view {
            Some(view) => view,
            None => RenderView::from_window(&self.view_window()),
        };
        self.renderer.draw(canvas, view.view_projection());
    }

    fn on_second(&mut self, stats: &LoopStats) {
        if self.log_stats {
            info!("{stats}");
        }
    }

    fn exit_requested(&self) -> bool {
        self.exit
    }

    fn on_key_down(&mut self, key: Key, modifiers: Modifiers) {
        if let Some(action) = action_for_key(key, modifiers) {
            self.apply(action);
        }
    }

    fn on_key_up(&mut self, key: Key, modifiers: Modifiers) {
        if let Some(action) = action_for_key(key, modifiers) {
            self.release(action);
        }
    }

    fn on_mouse_move(&mut self, position: IVec2) {
        self.camera.drag_to(position);
    }

    fn on_mouse_button_down(&mut self, button: MouseButton, position: IVec2) {
        match button {
            MouseButton::Left => self.camera.begin_drag(position),
            MouseButton::Right => {
                self.erase_at(position);
            }
            MouseButton::Middle => {
                self.paint_at(position, MARKER_TILE);
            }
            MouseButton::Other(id) => trace!(id, "unbound mouse button"),
        }
    }

    fn on_mouse_button_up(&mut self, button: MouseButton, _position: IVec2) {
        if button == MouseButton::Left {
            self.camera.end_drag();
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height, self.grid.extent());
        debug!(
            width,
            height,
            view_size = ?self.camera.view_size(),
            "viewport resized"
        );
    }

    fn on_quit(&mut self) {
        info!("quit requested by host");
    }
}
