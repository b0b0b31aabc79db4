use tileworld_common::{TileId, TileKind};
use tileworld_kernel::TileGrid;

/// Grid inspector for developer tooling.
///
/// Read-only queries against the tile grid for debugging and the CLI.
pub struct GridInspector;

impl GridInspector {
    /// Produce a summary of the grid.
    pub fn summary(grid: &TileGrid) -> GridSummary {
        let heights = || (0..grid.width()).filter_map(|x| grid.filled_height(x));
        GridSummary {
            width: grid.width(),
            height: grid.height(),
            filled: grid.filled_count(),
            min_height: heights().min().unwrap_or(0),
            max_height: heights().max().unwrap_or(0),
            hash: grid.state_hash(),
        }
    }

    /// Describe one column, or `None` outside the grid.
    pub fn inspect_column(grid: &TileGrid, x: u32) -> Option<ColumnInfo> {
        let column = grid.column(x)?;
        let filled_height = grid.filled_height(x)?;
        let surface = filled_height
            .checked_sub(1)
            .and_then(|top| column.get(top as usize).copied());
        Some(ColumnInfo {
            x,
            filled_height,
            surface,
        })
    }

    /// Per-kind tile counts, in [`TileKind`] declaration order.
    pub fn kind_counts(grid: &TileGrid) -> [(TileKind, usize); 5] {
        let mut counts = [
            (TileKind::Empty, 0),
            (TileKind::Surface, 0),
            (TileKind::Fill, 0),
            (TileKind::Marker, 0),
            (TileKind::Other, 0),
        ];
        for &tile in grid.tiles() {
            let kind = TileKind::of(tile);
            if let Some(slot) = counts.iter_mut().find(|(k, _)| *k == kind) {
                slot.1 += 1;
            }
        }
        counts
    }
}

/// Summary of grid state for the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSummary {
    pub width: u32,
    pub height: u32,
    pub filled: usize,
    /// Lowest contiguous column fill.
    pub min_height: u32,
    /// Highest contiguous column fill.
    pub max_height: u32,
    pub hash: u64,
}

impl std::fmt::Display for GridSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid: {}x{} filled={} heights={}..={} hash={:016x}",
            self.width, self.height, self.filled, self.min_height, self.max_height, self.hash
        )
    }
}

/// Details of a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub x: u32,
    pub filled_height: u32,
    /// Topmost tile of the filled run.
    pub surface: Option<TileId>,
}

impl std::fmt::Display for ColumnInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.surface {
            Some(tile) => write!(
                f,
                "Column {} height={} surface=0x{:02x}",
                self.x, self.filled_height, tile
            ),
            None => write!(f, "Column {} empty", self.x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn staircase() -> TileGrid {
        let mut grid = TileGrid::new(3, 4);
        for x in 0..3 {
            for y in 0..=x {
                let tile = if y == x { 0x01 } else { 0x11 };
                grid.set(IVec2::new(x, y), tile).unwrap();
            }
        }
        grid
    }

    #[test]
    fn summary_empty_grid() {
        let summary = GridInspector::summary(&TileGrid::empty());
        assert_eq!(summary.width, 0);
        assert_eq!(summary.filled, 0);
        assert_eq!(summary.min_height, 0);
        assert_eq!(summary.max_height, 0);
    }

    #[test]
    fn summary_reports_height_range() {
        let grid = staircase();
        let summary = GridInspector::summary(&grid);
        assert_eq!(summary.filled, 6);
        assert_eq!(summary.min_height, 1);
        assert_eq!(summary.max_height, 3);
        assert_eq!(summary.hash, grid.state_hash());
    }

    #[test]
    fn inspect_column_found() {
        let info = GridInspector::inspect_column(&staircase(), 2).unwrap();
        assert_eq!(info.filled_height, 3);
        assert_eq!(info.surface, Some(0x01));
    }

    #[test]
    fn inspect_column_out_of_range() {
        assert!(GridInspector::inspect_column(&staircase(), 3).is_none());
    }

    #[test]
    fn inspect_empty_column() {
        let info = GridInspector::inspect_column(&TileGrid::new(2, 2), 0).unwrap();
        assert_eq!(info.surface, None);
        assert_eq!(format!("{info}"), "Column 0 empty");
    }

    #[test]
    fn kind_counts_cover_every_tile() {
        let grid = staircase();
        let counts = GridInspector::kind_counts(&grid);
        assert_eq!(counts[1], (TileKind::Surface, 3));
        assert_eq!(counts[2], (TileKind::Fill, 3));
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, grid.tiles().len());
    }

    #[test]
    fn summary_display() {
        let s = format!("{}", GridInspector::summary(&staircase()));
        assert!(s.contains("3x4"));
        assert!(s.contains("filled=6"));
    }
}
