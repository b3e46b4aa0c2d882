//! Grid module - the play field
//!
//! The grid is a 9x16 matrix of intensity codes stored as a flat array.
//! Coordinates: (x, y) where x ranges 0..8 (left to right), y ranges 0..15
//! (top to bottom). Row 0 is the spawn row; a nonzero cell there ends the game.
//!
//! Placement queries take a [`Shape`] and the grid position of its top-left
//! corner. The anchor may lie partly outside the field; only occupied shape
//! cells are checked.

use arrayvec::ArrayVec;

use crate::shapes::Shape;
use crate::types::{Cell, EMPTY, GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// Total number of cells on the grid
pub const GRID_SIZE: usize = WIDTH * HEIGHT;

/// Row indices of completed rows, top to bottom
pub type CompletedRows = ArrayVec<usize, HEIGHT>;

/// The play field - 9 columns x 16 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Row-major (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y); None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        self.get(x, y) == Some(EMPTY)
    }

    /// Cells of row `y`. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Overwrite every cell of row `y`; out-of-range rows are ignored.
    pub fn fill_row(&mut self, y: usize, value: Cell) {
        if y < HEIGHT {
            self.cells[y * WIDTH..(y + 1) * WIDTH].fill(value);
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True iff every occupied cell of `shape` anchored at (x, y) lands on an
    /// in-bounds empty cell.
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().all(|(dx, dy)| self.is_free(x + dx, y + dy))
    }

    /// Write `value` into every occupied cell of `shape` anchored at (x, y).
    ///
    /// Callers check [`Grid::can_place`] first. Cells that fall outside the
    /// grid are skipped rather than reported.
    pub fn place(&mut self, shape: &Shape, x: i8, y: i8, value: Cell) {
        for (dx, dy) in shape.cells() {
            self.set(x + dx, y + dy, value);
        }
    }

    /// Lowest row at which `shape` rests when dropped in column `x` from the
    /// spawn row. None if it does not fit at row 0.
    pub fn resting_row(&self, shape: &Shape, x: i8) -> Option<i8> {
        if !self.can_place(shape, x, 0) {
            return None;
        }
        let mut y = 0;
        while self.can_place(shape, x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|&c| c != EMPTY)
    }

    /// Indices of all completed rows, top to bottom.
    ///
    /// This is the single row-completion query: the line-clear animation and
    /// [`Grid::clear_completed_rows`] both use it.
    pub fn completed_rows(&self) -> CompletedRows {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Return a compacted copy with completed rows removed, plus how many were
    /// removed. Surviving rows keep their order and empty rows are added on
    /// top so the height stays fixed.
    pub fn clear_completed_rows(&self) -> (Grid, usize) {
        self.clear_rows(&self.completed_rows())
    }

    /// Compact away `rows`, as found by an earlier [`Grid::completed_rows`].
    ///
    /// Indices outside the grid and repeats are ignored. Returns the new grid
    /// and the number of rows removed.
    pub fn clear_rows(&self, rows: &[usize]) -> (Grid, usize) {
        if rows.is_empty() {
            return (*self, 0);
        }

        let mut out = Grid::new();
        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            out.cells[write_y * WIDTH..(write_y + 1) * WIDTH].copy_from_slice(self.row(read_y));
        }

        (out, write_y)
    }

    /// Game over: something occupies the spawn row
    pub fn is_top_out(&self) -> bool {
        self.row(0).iter().any(|&c| c != EMPTY)
    }

    /// Stack height per column (distance from the floor to the topmost
    /// occupied cell, 0 for an empty column).
    pub fn column_heights(&self) -> [u32; WIDTH] {
        let mut heights = [0u32; WIDTH];
        for (x, h) in heights.iter_mut().enumerate() {
            if let Some(top) = (0..HEIGHT).find(|&y| self.cells[y * WIDTH + x] != EMPTY) {
                *h = (HEIGHT - top) as u32;
            }
        }
        heights
    }

    /// Number of nonzero cells
    pub fn block_count(&self) -> u32 {
        self.cells.iter().filter(|&&c| c != EMPTY).count() as u32
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Build a grid from rows of cells (tests and fixtures).
    ///
    /// Missing rows or cells stay empty; extra ones are ignored.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Self {
        let mut grid = Grid::new();
        for (y, row) in rows.iter().take(HEIGHT).enumerate() {
            for (x, &cell) in row.as_ref().iter().take(WIDTH).enumerate() {
                grid.cells[y * WIDTH + x] = cell;
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
