use glam::{IVec2, UVec2};
use tileworld_common::{NO_TILE, TileId};

/// Errors from grid accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("tile ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

/// Dense, owned tile buffer.
///
/// Storage is column-major: all rows of column 0 come first, bottom row
/// (`y = 0`) first. Every access is bounds-checked; callers never index the
/// buffer directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileId>,
}

impl TileGrid {
    /// Create a grid of the given size with every cell set to [`NO_TILE`].
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![NO_TILE; len],
        }
    }

    /// The zero-sized grid returned for invalid generation input.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Size as signed coordinates, convenient for viewport arithmetic.
    pub fn extent(&self) -> IVec2 {
        self.size().as_ivec2()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.x as usize * self.height as usize + pos.y as usize)
    }

    fn out_of_bounds(&self, pos: IVec2) -> GridError {
        GridError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Tile at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: IVec2) -> Option<TileId> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Overwrite the tile at `pos`, returning the previous value.
    pub fn set(&mut self, pos: IVec2, tile: TileId) -> Result<TileId, GridError> {
        let i = self.index(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        Ok(std::mem::replace(&mut self.tiles[i], tile))
    }

    /// Clear the tile at `pos`, returning the previous value.
    pub fn erase(&mut self, pos: IVec2) -> Result<TileId, GridError> {
        self.set(pos, NO_TILE)
    }

    /// All rows of column `x`, bottom row first.
    pub fn column(&self, x: u32) -> Option<&[TileId]> {
        if x >= self.width {
            return None;
        }
        let start = x as usize * self.height as usize;
        Some(&self.tiles[start..start + self.height as usize])
    }

    pub(crate) fn column_mut(&mut self, x: u32) -> Option<&mut [TileId]> {
        if x >= self.width {
            return None;
        }
        let start = x as usize * self.height as usize;
        Some(&mut self.tiles[start..start + self.height as usize])
    }

    /// Number of contiguous filled rows counted up from the bottom of column `x`.
    pub fn filled_height(&self, x: u32) -> Option<u32> {
        self.column(x)
            .map(|col| col.iter().take_while(|&&t| t != NO_TILE).count() as u32)
    }

    /// Number of non-empty cells in the grid.
    pub fn filled_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t != NO_TILE).count()
    }

    /// Raw column-major tile buffer.
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// FNV-1a hash over the dimensions and tile buffer.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&self.width.to_le_bytes());
        mix(&self.height.to_le_bytes());
        mix(self.tiles.as_slice());
        h
    }
}
