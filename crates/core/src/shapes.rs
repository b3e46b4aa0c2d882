//! Shapes module - tetromino masks and their distinct rotations
//!
//! A [`Shape`] is a rectangular 0/1 mask trimmed to its bounding box. Each
//! [`PieceKind`] maps to the ordered list of its distinct orientations, built
//! once by rotating the base mask clockwise and skipping repeats.
//! Symmetric pieces therefore have fewer than four entries (O has one,
//! I/S/Z have two).

use std::fmt;
use std::sync::OnceLock;

use crate::types::PieceKind;

/// Why a mask could not become a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    Empty,
    Ragged,
    NoOccupiedCells,
}

impl ShapeError {
    pub fn code(self) -> &'static str {
        match self {
            ShapeError::Empty => "empty_mask",
            ShapeError::Ragged => "ragged_mask",
            ShapeError::NoOccupiedCells => "blank_mask",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ShapeError::Empty => "mask has no rows or no columns",
            ShapeError::Ragged => "mask rows differ in length",
            ShapeError::NoOccupiedCells => "mask has no occupied cells",
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ShapeError {}

/// One orientation of a piece, trimmed to its minimal bounding box.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Row-major occupancy, `height * width` entries
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape from rows of 0/1 values, trimming empty border rows and
    /// columns.
    pub fn from_mask(rows: &[&[u8]]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        if rows.iter().any(|r| r.len() != width) {
            return Err(ShapeError::Ragged);
        }

        let cells = rows.iter().flat_map(|r| r.iter().map(|&v| v != 0)).collect();
        Self::trimmed(width, height, cells).ok_or(ShapeError::NoOccupiedCells)
    }

    /// Crop `cells` to the bounding box of its occupied cells.
    /// Returns None when nothing is occupied.
    fn trimmed(width: usize, height: usize, cells: Vec<bool>) -> Option<Self> {
        let occupied = |x: usize, y: usize| cells[y * width + x];

        let top = (0..height).find(|&y| (0..width).any(|x| occupied(x, y)))?;
        let bottom = (0..height).rev().find(|&y| (0..width).any(|x| occupied(x, y)))?;
        let left = (0..width).find(|&x| (0..height).any(|y| occupied(x, y)))?;
        let right = (0..width).rev().find(|&x| (0..height).any(|y| occupied(x, y)))?;

        let mut out = Vec::with_capacity((bottom - top + 1) * (right - left + 1));
        for y in top..=bottom {
            for x in left..=right {
                out.push(occupied(x, y));
            }
        }

        Some(Self {
            width: (right - left + 1) as u8,
            height: (bottom - top + 1) as u8,
            cells: out,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the mask cell at (x, y) is occupied; false outside the box.
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Offsets (dx, dy) of the occupied cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(i, _)| ((i % w) as i8, (i / w) as i8))
    }

    /// Rotate 90° clockwise (transpose, then reverse each row) and re-trim.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        // The rotated mask is h wide and w tall; source (x, y) lands at (h-1-y, x).
        let mut out = vec![false; w * h];
        for y in 0..h {
            for x in 0..w {
                out[x * h + (h - 1 - y)] = self.cells[y * w + x];
            }
        }
        // Rotation of a trimmed mask stays trimmed, but re-trim anyway so the
        // invariant never depends on the input.
        Self::trimmed(h, w, out).unwrap_or_else(|| self.clone())
    }

    /// Distinct orientations in rotation order, starting with `self`.
    ///
    /// Orientations equal to one already produced are skipped, so a position
    /// in the result is also the number of quarter turns for every tetromino.
    pub fn rotations(&self) -> Vec<Shape> {
        let mut out = vec![self.clone()];
        let mut cur = self.clone();
        for _ in 0..3 {
            cur = cur.rotated_cw();
            if !out.contains(&cur) {
                out.push(cur.clone());
            }
        }
        out
    }
}

/// Spawn-orientation mask for each kind
fn base_mask(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => &[&[1, 1, 1, 1]],
        PieceKind::O => &[&[1, 1], &[1, 1]],
        PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
        PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
        PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
        PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
        PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
    }
}

/// Precomputed rotation table, indexed by [`PieceKind::index`].
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    rotations: [Vec<Shape>; 7],
}

impl ShapeLibrary {
    /// Build the table from the built-in masks.
    ///
    /// # Panics
    ///
    /// Panics if a built-in mask is malformed; that is a bug, not a runtime
    /// condition.
    pub fn new() -> Self {
        let rotations = PieceKind::ALL.map(|kind| {
            let base = Shape::from_mask(base_mask(kind))
                .unwrap_or_else(|e| panic!("built-in mask for {:?} is malformed: {}", kind, e));
            base.rotations()
        });
        Self { rotations }
    }

    /// Process-wide table, built on first use.
    pub fn get() -> &'static ShapeLibrary {
        static LIBRARY: OnceLock<ShapeLibrary> = OnceLock::new();
        LIBRARY.get_or_init(ShapeLibrary::new)
    }

    pub fn rotations(&self, kind: PieceKind) -> &[Shape] {
        &self.rotations[kind.index()]
    }
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct orientations of `kind` from the shared table.
pub fn rotations(kind: PieceKind) -> &'static [Shape] {
    ShapeLibrary::get().rotations(kind)
}
