//! Terminal front end: an emulated LED matrix.
//!
//! The engine writes (row, col, intensity) triples; this crate stores them
//! in a panel model, draws the panel into a glyph framebuffer and flushes
//! only the changed glyphs to the terminal.

pub mod fb;
pub mod keys;
pub mod panel;
pub mod renderer;

pub use autotris_engine as engine;
pub use autotris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use keys::{should_quit, KeyPacer};
pub use panel::{MatrixPanel, PanelView, TerminalPanel};
pub use renderer::TerminalRenderer;
