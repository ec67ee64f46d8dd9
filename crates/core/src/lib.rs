//! Core game logic - the SRS rules engine
//!
//! Pure, deterministic and single-threaded: no I/O, no clocks, no async.
//! The caller issues intents and gravity ticks; the engine mutates the board
//! and piece and exposes read-only state for a presentation layer.
//!
//! # Module Structure
//!
//! - [`pieces`]: shape table, SRS kick tables and kick resolution
//! - [`piece`]: the falling piece and its derived cells
//! - [`rng`]: 7-bag randomizer
//! - [`board`]: grid, collision, locking and line clears
//! - [`scoring`]: line clear, T-spin, back-to-back and drop bonuses
//! - [`config`]: per-engine ruleset and its validation
//! - [`game_state`]: the state machine and intents
//! - [`snapshot`]: per-frame read-only view
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: a new bag is shuffled only when the last one is empty
//! - **SRS Rotation**: wall kicks for every kind except O, optional 180° turns
//! - **Lock Delay**: counted in grounded gravity ticks, with a named reset policy
//! - **Hold**: once per piece, cleared by the next lock
//! - **T-Spin Detection**: three of the four pivot corners blocked
//! - **Scoring**: 100/300/500/800, T-spin table, back-to-back 3/2 plus a flat bonus
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::GameState;
//! use srs_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert!(game.take_last_event().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::advance_frame`](game_state::GameState::advance_frame)
//! once per frame (60 FPS); gravity falls one row every `gravity_frames`
//! frames. Or call [`GameState::tick`](game_state::GameState::tick) directly
//! for one gravity step.

pub mod board;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use srs_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{
    BoardConfig, ConfigError, LockResetPolicy, RulesConfig, SpawnPose, MAX_KICK_OFFSET,
};
pub use game_state::GameState;
pub use piece::Piece;
pub use pieces::{cells_at, get_shape, try_rotate, KickTables, Rotated};
pub use rng::{random_seed, Bag};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
