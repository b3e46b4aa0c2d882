//! Renderer: projects the grid and the falling piece onto the panel.
//!
//! Projection is pure ([`PixelFrame::project`]); [`Renderer::present`] then
//! pushes every pixel through the panel orientation into a [`PixelSink`].

use anyhow::Result;

use crate::core::{Grid, Shape, GRID_SIZE};
use crate::sink::PixelSink;
use crate::types::{Cell, EMPTY, GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// A shape drawn on top of the locked cells.
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub shape: &'a Shape,
    pub x: i8,
    pub y: i8,
    pub value: Cell,
}

/// One frame of logical pixels, row-major, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFrame {
    pixels: [Cell; GRID_SIZE],
}

impl PixelFrame {
    /// All pixels dark
    pub fn dark() -> Self {
        Self {
            pixels: [EMPTY; GRID_SIZE],
        }
    }

    /// Locked cells plus the overlay, clipped to the grid.
    pub fn project(grid: &Grid, overlay: Option<Overlay<'_>>) -> Self {
        let mut pixels = [EMPTY; GRID_SIZE];
        pixels.copy_from_slice(grid.cells());

        if let Some(o) = overlay {
            for (dx, dy) in o.shape.cells() {
                let x = o.x + dx;
                let y = o.y + dy;
                if x >= 0 && (x as usize) < WIDTH && y >= 0 && (y as usize) < HEIGHT {
                    pixels[y as usize * WIDTH + x as usize] = o.value;
                }
            }
        }

        Self { pixels }
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x < WIDTH && y < HEIGHT {
            self.pixels[y * WIDTH + x]
        } else {
            EMPTY
        }
    }

    pub fn pixels(&self) -> &[Cell] {
        &self.pixels
    }
}

impl Default for PixelFrame {
    fn default() -> Self {
        Self::dark()
    }
}

/// How logical (x, y) maps onto the panel's (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMapping {
    /// Panel row 0 is the floor: `(row, col) = (H-1-y, x)`.
    #[default]
    FlipRows,
    /// `(row, col) = (y, x)`
    Direct,
}

impl PanelMapping {
    pub fn to_panel(self, x: usize, y: usize) -> (i32, i32) {
        match self {
            PanelMapping::FlipRows => ((HEIGHT - 1 - y) as i32, x as i32),
            PanelMapping::Direct => (y as i32, x as i32),
        }
    }
}

/// Forwards frames to a pixel sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    mapping: PanelMapping,
}

impl Renderer {
    pub fn new(mapping: PanelMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> PanelMapping {
        self.mapping
    }

    /// Write every pixel of `frame`, then flush.
    ///
    /// Individual pixel failures are dropped so one bad write cannot stall
    /// the frame; only a failed flush is reported.
    pub fn present<S: PixelSink + ?Sized>(&self, frame: &PixelFrame, sink: &mut S) -> Result<()> {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let (row, col) = self.mapping.to_panel(x, y);
                let _ = sink.set_pixel(row, col, frame.get(x, y));
            }
        }
        sink.flush()
    }

    /// Turn the whole panel off.
    pub fn blank<S: PixelSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        self.present(&PixelFrame::dark(), sink)
    }
}
