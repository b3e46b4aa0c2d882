//! Autotris (workspace facade crate).
//!
//! Re-exports the workspace crates as `autotris::{core,engine,term,types}`
//! and holds the pieces the binary needs on top of them: runtime
//! configuration and the event log.

pub mod config;
pub mod event_log;

pub use autotris_core as core;
pub use autotris_engine as engine;
pub use autotris_term as term;
pub use autotris_types as types;
