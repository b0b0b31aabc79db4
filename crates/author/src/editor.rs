use glam::IVec2;
use tileworld_common::{NO_TILE, TileId};
use tileworld_kernel::{GridError, TileGrid};

/// A single tile change. Carries enough context to undo itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEdit {
    pub pos: IVec2,
    pub old: TileId,
    pub new: TileId,
}

impl TileEdit {
    /// The edit that reverts this one.
    pub fn inverse(&self) -> Self {
        Self {
            pos: self.pos,
            old: self.new,
            new: self.old,
        }
    }
}

/// Errors from edit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("cannot edit tile ({x}, {y}): outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

impl From<GridError> for EditError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => Self::OutOfBounds {
                x,
                y,
                width,
                height,
            },
        }
    }
}

/// Tile editor with undo/redo.
///
/// Edits that change nothing (erasing an empty tile, painting a tile with
/// itself) are not recorded.
#[derive(Debug, Default)]
pub struct TileEditor {
    undo_stack: Vec<TileEdit>,
    redo_stack: Vec<TileEdit>,
}

impl TileEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the tile at `pos`.
    pub fn erase(&mut self, grid: &mut TileGrid, pos: IVec2) -> Result<Option<TileEdit>, EditError> {
        self.paint(grid, pos, NO_TILE)
    }

    /// Write `tile` at `pos`.
    pub fn paint(
        &mut self,
        grid: &mut TileGrid,
        pos: IVec2,
        tile: TileId,
    ) -> Result<Option<TileEdit>, EditError> {
        let old = grid.set(pos, tile)?;
        if old == tile {
            return Ok(None);
        }
        let edit = TileEdit { pos, old, new: tile };
        self.undo_stack.push(edit);
        self.redo_stack.clear();
        Ok(Some(edit))
    }

    /// Undo the last edit. Returns the reverted edit, if any.
    pub fn undo(&mut self, grid: &mut TileGrid) -> Option<TileEdit> {
        let edit = self.undo_stack.pop()?;
        if let Err(err) = apply(grid, &edit.inverse()) {
            tracing::warn!("undo skipped: {err}");
            self.undo_stack.push(edit);
            return None;
        }
        self.redo_stack.push(edit);
        Some(edit)
    }

    /// Redo the last undone edit. Returns the reapplied edit, if any.
    pub fn redo(&mut self, grid: &mut TileGrid) -> Option<TileEdit> {
        let edit = self.redo_stack.pop()?;
        if let Err(err) = apply(grid, &edit) {
            tracing::warn!("redo skipped: {err}");
            self.redo_stack.push(edit);
            return None;
        }
        self.undo_stack.push(edit);
        Some(edit)
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

fn apply(grid: &mut TileGrid, edit: &TileEdit) -> Result<(), GridError> {
    grid.set(edit.pos, edit.new).map(|_| ())
}
