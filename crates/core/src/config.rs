//! Ruleset configuration
//!
//! Everything that differs between ruleset variants lives here instead of in
//! globals: board geometry, the gravity table, lock delay and its reset
//! policy, preview depth, spawn pose and kick data. A config is fixed for the
//! lifetime of an engine.
//!
//! Configs deserialize from JSON with every field optional; missing fields
//! take the standard values.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::pieces::{KickTables, MinoOffset};
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_FRAMES, LOCK_DELAY_TICKS, MAX_PREVIEW_DEPTH,
    PREVIEW_DEPTH, SPAWN_X, SPAWN_Y, VISIBLE_ROWS,
};

/// Largest kick offset accepted on either axis.
pub const MAX_KICK_OFFSET: i8 = 4;

/// What successful movement does to a grounded piece's lock-delay counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockResetPolicy {
    /// The counter only resets when the piece actually falls.
    #[default]
    NeverReset,
    /// Every successful move, rotation or soft drop resets it ("infinite spin").
    ResetOnAnyMove,
}

/// Board geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub cols: u8,
    /// Total rows, hidden buffer included.
    pub rows: u8,
    pub visible_rows: u8,
}

impl BoardConfig {
    /// Rows above the visible field
    pub fn hidden_rows(&self) -> u8 {
        self.rows.saturating_sub(self.visible_rows)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cols: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            visible_rows: VISIBLE_ROWS,
        }
    }
}

/// Where new pieces appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPose {
    pub x: i8,
    pub y: i8,
}

impl Default for SpawnPose {
    fn default() -> Self {
        Self {
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }
}

/// Immutable per-engine ruleset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub board: BoardConfig,
    /// Frames per gravity cell, indexed by level and clamped to the last entry.
    pub gravity_frames: Vec<u32>,
    /// Grounded gravity ticks before a piece locks.
    pub lock_delay: u32,
    pub lock_reset: LockResetPolicy,
    pub preview_depth: usize,
    pub spawn: SpawnPose,
    pub kicks: KickTables,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            gravity_frames: GRAVITY_FRAMES.to_vec(),
            lock_delay: LOCK_DELAY_TICKS,
            lock_reset: LockResetPolicy::NeverReset,
            preview_depth: PREVIEW_DEPTH,
            spawn: SpawnPose::default(),
            kicks: KickTables::srs(),
        }
    }
}

impl RulesConfig {
    /// Standard rules where any successful movement refreshes lock delay.
    pub fn infinite_spin() -> Self {
        Self {
            lock_reset: LockResetPolicy::ResetOnAnyMove,
            ..Self::default()
        }
    }

    /// Enable 180° rotation with the extended kick list.
    pub fn with_half_turns(mut self) -> Self {
        self.kicks = KickTables::srs_with_half_turns();
        self
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let BoardConfig {
            cols,
            rows,
            visible_rows,
        } = self.board;

        // Every kind must fit at any rotation, and i8 coordinates must not wrap.
        if !(4..=100).contains(&cols) || !(4..=100).contains(&rows) {
            return Err(ConfigError::BoardSize { cols, rows });
        }
        if visible_rows == 0 || visible_rows > rows {
            return Err(ConfigError::VisibleRows { visible_rows, rows });
        }
        if self.gravity_frames.is_empty() {
            return Err(ConfigError::EmptyGravityTable);
        }
        if let Some(level) = self.gravity_frames.iter().position(|&f| f == 0) {
            return Err(ConfigError::ZeroGravityFrames { level });
        }
        if self.preview_depth > MAX_PREVIEW_DEPTH {
            return Err(ConfigError::PreviewDepth {
                depth: self.preview_depth,
                max: MAX_PREVIEW_DEPTH,
            });
        }
        let SpawnPose { x, y } = self.spawn;
        if x < 0 || x >= cols as i8 || y < 0 || y >= rows as i8 {
            return Err(ConfigError::SpawnOutOfBounds { x, y });
        }
        self.validate_kicks()
    }

    /// Every candidate list starts in place and stays within
    /// [`MAX_KICK_OFFSET`], so kicked positions cannot wrap `i8`.
    fn validate_kicks(&self) -> Result<(), ConfigError> {
        let KickTables { jlstz, i, half_turn } = &self.kicks;
        let quarter = jlstz
            .iter()
            .map(|row| ("jlstz", row.as_slice()))
            .chain(i.iter().map(|row| ("i", row.as_slice())));
        let half = half_turn.iter().map(|row| ("half_turn", row.as_slice()));

        for (row, (table, candidates)) in quarter.chain(half).enumerate() {
            let in_range = |&(dx, dy): &MinoOffset| {
                dx.unsigned_abs() <= MAX_KICK_OFFSET as u8
                    && dy.unsigned_abs() <= MAX_KICK_OFFSET as u8
            };
            if candidates.first() != Some(&(0, 0)) || !candidates.iter().all(in_range) {
                return Err(ConfigError::Kicks { table, row: row % 8 });
            }
        }
        Ok(())
    }

    /// Check that a prepared board has this config's dimensions.
    pub fn check_board(&self, board: &Board) -> Result<(), ConfigError> {
        if board.width() != self.board.cols || board.height() != self.board.rows {
            return Err(ConfigError::BoardMismatch {
                expected: (self.board.cols, self.board.rows),
                found: (board.width(), board.height()),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON, e.g. to write a starter config file.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reasons a ruleset is rejected
#[derive(Debug)]
pub enum ConfigError {
    BoardSize {
        cols: u8,
        rows: u8,
    },
    VisibleRows {
        visible_rows: u8,
        rows: u8,
    },
    EmptyGravityTable,
    ZeroGravityFrames {
        level: usize,
    },
    PreviewDepth {
        depth: usize,
        max: usize,
    },
    SpawnOutOfBounds {
        x: i8,
        y: i8,
    },
    BoardMismatch {
        expected: (u8, u8),
        found: (u8, u8),
    },
    /// A kick list does not start at (0, 0) or has an oversized offset.
    Kicks {
        table: &'static str,
        row: usize,
    },
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSize { cols, rows } => {
                write!(f, "board size {cols}x{rows} is outside 4..=100")
            }
            ConfigError::VisibleRows { visible_rows, rows } => {
                write!(f, "visible rows {visible_rows} must be in 1..={rows}")
            }
            ConfigError::EmptyGravityTable => write!(f, "gravity table is empty"),
            ConfigError::ZeroGravityFrames { level } => {
                write!(f, "gravity table entry for level {level} is zero")
            }
            ConfigError::PreviewDepth { depth, max } => {
                write!(f, "preview depth {depth} exceeds maximum {max}")
            }
            ConfigError::SpawnOutOfBounds { x, y } => {
                write!(f, "spawn pose ({x}, {y}) is outside the board")
            }
            ConfigError::BoardMismatch { expected, found } => write!(
                f,
                "board is {}x{} but the ruleset expects {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            ConfigError::Kicks { table, row } => write!(
                f,
                "kick table {table} row {row} must start at (0, 0) and keep offsets within ±{MAX_KICK_OFFSET}"
            ),
            ConfigError::Json(err) => write!(f, "invalid config JSON: {err}"),
            ConfigError::Io(err) => write!(f, "cannot read config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(err) => Some(err),
            ConfigError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}
