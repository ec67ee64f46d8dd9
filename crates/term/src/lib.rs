//! Terminal presentation adapter.
//!
//! Renders a [`core::GameSnapshot`] into a framebuffer of styled glyphs and
//! flushes changed runs to the terminal. No game rules live here.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: snapshot to framebuffer (pure, unit-testable)
//! - [`renderer`]: framebuffer to terminal via crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
