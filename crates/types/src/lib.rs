//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout autotris.
//! Everything here is plain data with no behavior beyond lookups, so it can be
//! shared by the simulation, the renderer and the terminal front end.
//!
//! # Grid Dimensions
//!
//! The play field matches the 16x9 LED matrix it was built for:
//!
//! - **Width**: 9 columns (indexed 0-8)
//! - **Height**: 16 rows (indexed 0-15, row 0 is the spawn row, row 15 the floor)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 20 | Yield between outer iterations |
//! | `GRAVITY_INTERVAL` | 1 | Frames per gravity tick |
//! | `FLASH_COUNT` | 2 | Line-clear flash repetitions |
//! | `FLASH_HOLD_MS` | 100 | Hold per flash half-cycle |
//! | `RESET_PAUSE_MS` | 500 | Dark pause after a top-out |
//!
//! # Examples
//!
//! ```
//! use autotris_types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.intensity(), 150);
//!
//! assert_eq!(GRID_WIDTH, 9);
//! assert_eq!(GRID_HEIGHT, 16);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (9 columns)
pub const GRID_WIDTH: u8 = 9;
/// Grid height in cells (16 rows)
pub const GRID_HEIGHT: u8 = 16;

/// Frame pacing (milliseconds)
pub const FRAME_MS: u64 = 20;
/// Gravity runs on every n-th frame
pub const GRAVITY_INTERVAL: u32 = 1;

/// Line-clear animation
pub const FLASH_COUNT: u32 = 2;
pub const FLASH_HOLD_MS: u64 = 100;

/// Pause on a dark panel before the field is reset
pub const RESET_PAUSE_MS: u64 = 500;

/// Intensity used to highlight rows that are about to clear
pub const HIGHLIGHT_INTENSITY: Cell = 170;

/// A grid cell. `0` is empty, any other value is the intensity code of the
/// piece that filled it.
pub type Cell = u8;

/// Empty cell value
pub const EMPTY: Cell = 0;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position in [`PieceKind::ALL`]; used to index per-kind tables.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Brightness written into the grid for this kind
    pub fn intensity(self) -> Cell {
        match self {
            PieceKind::I => 220,
            PieceKind::O => 170,
            PieceKind::T => 150,
            PieceKind::S => 100,
            PieceKind::Z => 80,
            PieceKind::J => 40,
            PieceKind::L => 20,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}
