//! Core simulation - pure, deterministic, and testable
//!
//! Everything needed to decide where a piece should go, with no I/O and no
//! timing:
//!
//! - [`shapes`]: tetromino masks and their distinct rotations
//! - [`grid`]: the 9x16 field with placement, row-completion and compaction
//! - [`eval`]: heuristic scoring of a locked grid
//! - [`planner`]: exhaustive (rotation, column) search for the best placement
//! - [`rng`]: uniform piece selection behind a swappable source
//!
//! # Example
//!
//! ```
//! use autotris_core::{choose_best_placement, Grid};
//! use autotris_core::types::PieceKind;
//!
//! let mut grid = Grid::new();
//! let target = choose_best_placement(&mut grid, PieceKind::O).unwrap();
//!
//! // An O on an empty field lands flush with the floor.
//! assert_eq!(target.y, 14);
//! assert_eq!(grid, Grid::new());
//! ```

pub mod eval;
pub mod grid;
pub mod planner;
pub mod rng;
pub mod shapes;

pub use autotris_types as types;

pub use eval::{evaluate, GridFeatures, Weights};
pub use grid::{CompletedRows, Grid, GRID_SIZE};
pub use planner::{choose_best_placement, choose_best_placement_with, Placement};
pub use rng::{PieceCycle, PieceSource, UniformPieces};
pub use shapes::{rotations, Shape, ShapeError, ShapeLibrary};
