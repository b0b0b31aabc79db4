use tileworld_common::{ATLAS_CELLS, TileId, TileKind};

/// Side length of one atlas cell, in texels.
pub const ATLAS_CELL_TEXELS: u32 = 4;

/// Side length of the whole atlas, in texels.
pub const ATLAS_TEXELS: u32 = ATLAS_CELLS * ATLAS_CELL_TEXELS;

/// Base colour for a tile id.
pub fn tile_color(tile: TileId) -> [u8; 3] {
    let shade = (tile & 0x0F) * 4;
    match TileKind::of(tile) {
        TileKind::Empty => [0, 0, 0],
        TileKind::Surface => [40 + shade, 150 + shade, 50],
        TileKind::Fill => [110 + shade, 105 + shade, 100 + shade],
        TileKind::Marker => [230, 120 + shade, 30],
        TileKind::Other => [200, 40, 200],
    }
}

/// RGBA8 texels for a 16x16-cell palette atlas, row-major, top row first.
///
/// Each cell is a flat colour with a darker bottom-right border so tile
/// edges stay visible at any zoom.
pub fn atlas_pixels() -> Vec<u8> {
    let side = ATLAS_TEXELS as usize;
    let mut pixels = Vec::with_capacity(side * side * 4);
    for py in 0..ATLAS_TEXELS {
        for px in 0..ATLAS_TEXELS {
            let (col, row) = (px / ATLAS_CELL_TEXELS, py / ATLAS_CELL_TEXELS);
            let tile = (row * ATLAS_CELLS + col) as TileId;
            let [r, g, b] = tile_color(tile);
            let edge = px % ATLAS_CELL_TEXELS == ATLAS_CELL_TEXELS - 1
                || py % ATLAS_CELL_TEXELS == ATLAS_CELL_TEXELS - 1;
            let dim = |c: u8| if edge { c / 4 * 3 } else { c };
            pixels.extend_from_slice(&[dim(r), dim(g), dim(b), 255]);
        }
    }
    pixels
}
