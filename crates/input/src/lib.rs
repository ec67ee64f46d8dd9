//! Terminal input adapter (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides a
//! DAS/ARR input handler suitable for terminal environments (including terminals
//! without key-release events). Timing lives here, never in the engine.

pub mod handler;
pub mod map;

pub use srs_tetris_types as types;

pub use handler::{InputHandler, InputTiming};
pub use map::{handle_key_event, should_quit, should_restart};
