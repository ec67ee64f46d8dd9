//! SRS falling-block engine (workspace facade crate).
//!
//! The rules engine and its adapters live in dedicated crates under `crates/`;
//! this package re-exports them as `srs_tetris::{core,input,term,types}` and
//! hosts the terminal runner's command-line handling.

pub mod cli;

pub use srs_tetris_core as core;
pub use srs_tetris_input as input;
pub use srs_tetris_term as term;
pub use srs_tetris_types as types;
