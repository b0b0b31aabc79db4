use glam::UVec2;
use serde::{Deserialize, Serialize};

/// Identifier of a tile in the grid. The high nibble selects the atlas row,
/// the low nibble the atlas column.
pub type TileId = u8;

/// Sentinel meaning "no tile present".
pub const NO_TILE: TileId = 0xFF;

/// Tile written by the paint tool.
pub const MARKER_TILE: TileId = 0x41;

/// Number of cells along each side of the tile atlas.
pub const ATLAS_CELLS: u32 = 16;

/// Coarse classification of a tile, derived from its atlas row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    /// Grass and other top-of-column tiles (atlas row 0).
    Surface,
    /// Stone and other below-surface tiles (atlas row 1).
    Fill,
    /// Tiles placed by the editor (atlas row 4).
    Marker,
    Other,
}

impl TileKind {
    pub fn of(tile: TileId) -> Self {
        if tile == NO_TILE {
            return Self::Empty;
        }
        match atlas_cell(tile).y {
            0 => Self::Surface,
            1 => Self::Fill,
            4 => Self::Marker,
            _ => Self::Other,
        }
    }
}

/// Atlas cell (column, row) a tile samples from.
pub fn atlas_cell(tile: TileId) -> UVec2 {
    UVec2::new(u32::from(tile & 0x0F), u32::from((tile >> 4) & 0x0F))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_empty() {
        assert_eq!(TileKind::of(NO_TILE), TileKind::Empty);
    }

    #[test]
    fn atlas_rows_classify_tiles() {
        assert_eq!(TileKind::of(0x00), TileKind::Surface);
        assert_eq!(TileKind::of(0x02), TileKind::Surface);
        assert_eq!(TileKind::of(0x13), TileKind::Fill);
        assert_eq!(TileKind::of(MARKER_TILE), TileKind::Marker);
        assert_eq!(TileKind::of(0x77), TileKind::Other);
    }

    #[test]
    fn atlas_cell_splits_nibbles() {
        assert_eq!(atlas_cell(0x41), UVec2::new(1, 4));
        assert_eq!(atlas_cell(0x1F), UVec2::new(15, 1));
    }
}
