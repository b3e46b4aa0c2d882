//! Autoplay engine: the game loop on top of the core simulation.
//!
//! - [`autoplay`]: the controller state machine (spawn, move, lock, clear, reset)
//! - [`render`]: grid + falling piece projection and panel orientation
//! - [`sink`]: the pixel output and pacing seams the loop is driven through
//!
//! # Example
//!
//! ```
//! use autotris_engine::{Autoplay, AutoplayConfig, NullSink, Unpaced};
//! use autotris_engine::core::PieceCycle;
//! use autotris_engine::types::PieceKind;
//!
//! let mut game = Autoplay::new(PieceCycle::new([PieceKind::O]), AutoplayConfig::default());
//! for _ in 0..40 {
//!     game.step(&mut NullSink, &mut Unpaced).unwrap();
//! }
//! assert!(game.stats().pieces >= 1);
//! ```

pub mod autoplay;
pub mod render;
pub mod sink;

pub use autotris_core as core;
pub use autotris_types as types;

pub use autoplay::{
    step_toward, Autoplay, AutoplayConfig, AutoplayEvent, AutoplayStats, FallingPiece, Tick,
    EVENT_BUFFER_CAPACITY,
};
pub use render::{Overlay, PanelMapping, PixelFrame, Renderer};
pub use sink::{NullSink, Pacer, PixelError, PixelSink, SleepPacer, Unpaced};
