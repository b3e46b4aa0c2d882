//! Output and pacing seams
//!
//! The controller never talks to hardware or clocks directly. Pixels go to a
//! [`PixelSink`]; waits go through a [`Pacer`]. The binary plugs in the
//! terminal panel and a sleeping pacer, tests plug in recorders.

use std::fmt;
use std::time::Duration;

use anyhow::Result;

use crate::types::Cell;

/// Why a single pixel write was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelError {
    OutOfRange { row: i32, col: i32 },
    Rejected,
}

impl PixelError {
    pub fn code(self) -> &'static str {
        match self {
            PixelError::OutOfRange { .. } => "out_of_range",
            PixelError::Rejected => "rejected",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PixelError::OutOfRange { .. } => "pixel coordinates outside the panel",
            PixelError::Rejected => "panel refused the write",
        }
    }
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelError::OutOfRange { row, col } => {
                write!(f, "{} ({}, {})", self.message(), row, col)
            }
            PixelError::Rejected => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for PixelError {}

/// A pixel-addressable panel.
///
/// Coordinates are physical panel coordinates (after any orientation
/// mapping). Callers treat a failed write as a dropped pixel, never as a
/// reason to stop the frame.
pub trait PixelSink {
    fn set_pixel(&mut self, row: i32, col: i32, intensity: Cell) -> Result<(), PixelError>;

    /// Make the pixels written since the last flush visible.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn set_pixel(&mut self, row: i32, col: i32, intensity: Cell) -> Result<(), PixelError> {
        (**self).set_pixel(row, col, intensity)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Discards everything. Used by headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PixelSink for NullSink {
    fn set_pixel(&mut self, _row: i32, _col: i32, _intensity: Cell) -> Result<(), PixelError> {
        Ok(())
    }
}

/// Fixed-duration yield between frames and during animations.
pub trait Pacer {
    fn hold(&mut self, duration: Duration);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn hold(&mut self, duration: Duration) {
        (**self).hold(duration)
    }
}

/// Blocks the thread for the requested time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn hold(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Returns immediately; the simulation runs as fast as it can.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

impl Pacer for Unpaced {
    fn hold(&mut self, _duration: Duration) {}
}
