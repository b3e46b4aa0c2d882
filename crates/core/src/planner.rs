//! Placement planner
//!
//! For a piece about to spawn, try every (rotation, column) pair, drop it to
//! its resting row, lock it in place temporarily, score the result and undo
//! the lock. The best candidate becomes the falling piece's target.

use crate::eval::Weights;
use crate::eval::GridFeatures;
use crate::grid::Grid;
use crate::shapes::rotations;
use crate::types::{PieceKind, EMPTY, GRID_WIDTH};

/// Chosen target for a piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index into the kind's rotation list
    pub rotation: usize,
    /// Grid column of the shape's left edge
    pub x: i8,
    /// Resting row of the shape's top edge
    pub y: i8,
    /// Rows the placement completes
    pub lines: usize,
    pub score: f64,
}

/// Best placement for `kind` using the default weights.
///
/// `grid` is borrowed mutably for the trial locks but is identical to its
/// input on return. None means the piece cannot enter the field at all.
pub fn choose_best_placement(grid: &mut Grid, kind: PieceKind) -> Option<Placement> {
    choose_best_placement_with(grid, kind, &Weights::default())
}

pub fn choose_best_placement_with(
    grid: &mut Grid,
    kind: PieceKind,
    weights: &Weights,
) -> Option<Placement> {
    let mut best: Option<Placement> = None;
    let trial_value = kind.intensity();

    for (rotation, shape) in rotations(kind).iter().enumerate() {
        let min_x = 1 - shape.width() as i8;
        for x in min_x..GRID_WIDTH as i8 {
            let Some(y) = grid.resting_row(shape, x) else {
                continue;
            };

            grid.place(shape, x, y, trial_value);
            let lines = grid.completed_rows().len();
            let score = weights.score(&GridFeatures::of(grid), lines);
            grid.place(shape, x, y, EMPTY);

            // Strictly greater: ties keep the earliest (rotation, column).
            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement {
                    rotation,
                    x,
                    y,
                    lines,
                    score,
                });
            }
        }
    }

    best
}
