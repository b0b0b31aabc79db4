use std::ops::RangeInclusive;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tileworld_common::TileId;

use crate::grid::TileGrid;

/// Tuning for the terrain silhouette and tile variety.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParams {
    /// Columns per linear segment of the silhouette.
    pub step: u32,
    /// Standard deviation of the per-segment slope perturbation.
    pub slope_std_dev: f64,
    /// Tiles drawn uniformly for the top row of each column.
    pub surface_tiles: RangeInclusive<TileId>,
    /// Tiles drawn uniformly for every row below the surface.
    pub fill_tiles: RangeInclusive<TileId>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            step: 8,
            slope_std_dev: 2.0,
            surface_tiles: 0x00..=0x02,
            fill_tiles: 0x10..=0x13,
        }
    }
}

/// Generate a terrain grid with the default parameters.
pub fn generate<R: Rng>(width: u32, height: u32, rng: &mut R) -> TileGrid {
    generate_with(&TerrainParams::default(), width, height, rng)
}

/// Generate a terrain grid.
///
/// The silhouette is a piecewise-linear random walk across the grid, one
/// segment per `params.step` columns. Each segment's slope is the average of
/// the previous slope and a normally distributed perturbation biased back
/// towards the starting height, so the walk stays smooth and does not drift
/// off the grid over long widths. Every column is filled from the bottom up to
/// its interpolated height, clamped to `[1, height]`.
///
/// Invalid input (a zero dimension or unusable parameters) yields
/// [`TileGrid::empty`].
pub fn generate_with<R: Rng>(
    params: &TerrainParams,
    width: u32,
    height: u32,
    rng: &mut R,
) -> TileGrid {
    if width < 1 || height < 1 {
        tracing::warn!(width, height, "terrain dimensions must be positive");
        return TileGrid::empty();
    }
    if params.step == 0 || params.surface_tiles.is_empty() || params.fill_tiles.is_empty() {
        tracing::warn!(?params, "unusable terrain parameters");
        return TileGrid::empty();
    }
    let slope_distribution = match Normal::new(0.0, params.slope_std_dev) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(std_dev = params.slope_std_dev, "bad slope distribution: {e}");
            return TileGrid::empty();
        }
    };

    let _span = tracing::debug_span!("generate_terrain", width, height).entered();
    let mut grid = TileGrid::new(width, height);

    let step = f64::from(params.step);
    let middle = f64::from(height) / 2.0;
    let mut previous_slope = 0.0_f64;
    let mut previous_height = middle;

    let mut segment_start = 0u32;
    while segment_start < width {
        let bias = if previous_height > middle { -1.0 } else { 1.0 };
        let perturbation = slope_distribution.sample(rng) + bias;
        let slope = (perturbation + previous_slope) / 2.0;
        let segment_end_height = previous_height + slope * step;

        let columns = params.step.min(width - segment_start);
        for j in 0..columns {
            let column_height = previous_height + f64::from(j) * slope;
            let rows = column_rows(column_height, height);
            if let Some(column) = grid.column_mut(segment_start + j) {
                fill_column(column, rows, params, rng);
            }
        }

        previous_slope = slope;
        previous_height = segment_end_height;
        segment_start += params.step;
    }

    tracing::debug!(filled = grid.filled_count(), "terrain generated");
    grid
}

/// Number of filled rows for a column whose silhouette sits at `h`.
fn column_rows(h: f64, height: u32) -> usize {
    // `as` truncates toward zero and maps NaN to 0.
    (h as i64).clamp(1, i64::from(height)) as usize
}

fn fill_column<R: Rng>(column: &mut [TileId], rows: usize, params: &TerrainParams, rng: &mut R) {
    let top = rows - 1;
    column[top] = rng.gen_range(params.surface_tiles.clone());
    for cell in column[..top].iter_mut().rev() {
        *cell = rng.gen_range(params.fill_tiles.clone());
    }
}
