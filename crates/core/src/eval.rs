//! Heuristic evaluation of a finished grid
//!
//! The planner scores each candidate placement with [`evaluate`] on the grid
//! as it looks right after the piece locks (before compaction). Higher is
//! better. The weights are policy: clearing lines outweighs everything, holes
//! are the worst penalty, and the shape terms only break ties between
//! otherwise similar stacks.

use crate::grid::Grid;
use crate::types::GRID_WIDTH;

const WIDTH: usize = GRID_WIDTH as usize;

/// Classic stack features of a locked grid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridFeatures {
    pub agg_height: u32,
    pub max_height: u32,
    pub min_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
    /// Population std-dev of column heights
    pub height_std: f64,
    /// Population std-dev of adjacent height differences
    pub diff_std: f64,
    pub blocks: u32,
}

impl GridFeatures {
    /// Compute all features from the column heights. Does not allocate.
    pub fn of(grid: &Grid) -> Self {
        let heights = grid.column_heights();

        let agg_height: u32 = heights.iter().sum();
        let max_height = heights.iter().copied().max().unwrap_or(0);
        let min_height = heights.iter().copied().min().unwrap_or(0);

        let mut diffs = [0.0f64; WIDTH - 1];
        for (d, w) in diffs.iter_mut().zip(heights.windows(2)) {
            *d = w[1] as f64 - w[0] as f64;
        }
        let bumpiness = diffs.iter().map(|d| d.abs()).sum::<f64>() as u32;

        let mut heights_f = [0.0f64; WIDTH];
        for (f, &h) in heights_f.iter_mut().zip(heights.iter()) {
            *f = h as f64;
        }

        Self {
            agg_height,
            max_height,
            min_height,
            holes: count_holes(grid),
            bumpiness,
            height_std: population_std(&heights_f),
            diff_std: if diffs.len() < 2 { 0.0 } else { population_std(&diffs) },
            blocks: grid.block_count(),
        }
    }
}

/// Empty cells with an occupied cell somewhere above them in the same column.
fn count_holes(grid: &Grid) -> u32 {
    let mut holes = 0;
    for x in 0..grid.width() as i8 {
        let mut covered = false;
        for y in 0..grid.height() as i8 {
            match grid.get(x, y) {
                Some(0) if covered => holes += 1,
                Some(0) | None => {}
                Some(_) => covered = true,
            }
        }
    }
    holes
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    var.sqrt()
}

/// Term weights; every penalty is subtracted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub lines: f64,
    pub holes: f64,
    pub blocks: f64,
    pub max_height: f64,
    pub height_std: f64,
    pub bumpiness: f64,
    pub diff_std: f64,
    pub height_range: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            lines: 1000.0,
            holes: 250.0,
            blocks: 10.0,
            max_height: 5.0,
            height_std: 2.0,
            bumpiness: 2.0,
            diff_std: 2.0,
            height_range: 2.0,
        }
    }
}

impl Weights {
    pub fn score(&self, f: &GridFeatures, lines_cleared: usize) -> f64 {
        lines_cleared as f64 * self.lines
            - f.holes as f64 * self.holes
            - f.blocks as f64 * self.blocks
            - f.max_height as f64 * self.max_height
            - f.height_std * self.height_std
            - f.bumpiness as f64 * self.bumpiness
            - f.diff_std * self.diff_std
            - (f.max_height - f.min_height) as f64 * self.height_range
    }
}

/// Score `grid` with the default weights.
pub fn evaluate(grid: &Grid, lines_cleared: usize) -> f64 {
    Weights::default().score(&GridFeatures::of(grid), lines_cleared)
}
