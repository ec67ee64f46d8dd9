//! Core types module - shared data structures and constants
//!
//! This crate defines the vocabulary shared by the rules engine and the thin
//! presentation adapters around it. Everything here is plain data with no
//! external dependencies, so it can be used from the engine, the terminal
//! renderer, and tests alike.
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions (all configurable per engine instance):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, y grows downward)
//! - **Hidden rows**: the top 2 rows are a spawn buffer and are not rendered
//! - **Spawn pose**: pivot at (4, 0), rotation 0
//!
//! # Timing Constants
//!
//! The engine counts time in frames and gravity ticks, never in wall-clock
//! time. The caller drives it at a fixed frame rate.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner |
//! | `LOCK_DELAY_TICKS` | 2 | Grounded gravity ticks before a piece locks |
//! | `PREVIEW_DEPTH` | 5 | Pieces shown in the next-queue |
//!
//! # DAS/ARR Timing
//!
//! Owned by the caller (input adapter), not the engine:
//!
//! - `DEFAULT_DAS_MS`: 100ms - about 6 frames before auto-repeat starts
//! - `DEFAULT_ARR_MS`: 16ms - one repeat per frame once DAS has charged
//! - `SOFT_DROP_ARR_MS`: 0 - soft drop is "infinite speed" (drops to contact)
//!
//! # Gravity by Level
//!
//! Frames per cell, indexed by level and clamped to the last entry:
//!
//! | Level | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 | 10 | 11 | 12 | 13 | 14 | 15 | 16 | 17 | 18+ |
//! |-------|---|---|---|---|---|---|---|---|---|---|----|----|----|----|----|----|----|----|-----|
//! | Frames | 48 | 43 | 38 | 33 | 28 | 23 | 18 | 13 | 8 | 6 | 5 | 5 | 4 | 4 | 3 | 3 | 2 | 2 | 1 |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{Cell, GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.as_str(), "T");
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::North.rotate_half(), Rotation::South);
//!
//! assert_ne!(GameAction::RotateCw, GameAction::Rotate180);
//!
//! assert!(Cell::Empty.is_empty());
//! assert_eq!(Cell::Occupied(piece).kind(), Some(PieceKind::T));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells, hidden buffer rows included (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Rows rendered to the player (the bottom 20)
pub const VISIBLE_ROWS: u8 = 20;

/// Default spawn pivot column (board center)
pub const SPAWN_X: i8 = 4;

/// Default spawn pivot row (top buffer row)
pub const SPAWN_Y: i8 = 0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity ticks a grounded piece may rest before it locks
pub const LOCK_DELAY_TICKS: u32 = 2;

/// Next-queue preview depth
pub const PREVIEW_DEPTH: usize = 5;

/// Largest preview depth the engine can hold without allocating
pub const MAX_PREVIEW_DEPTH: usize = 7;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 100;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 16;

/// Soft drop repeat rate in milliseconds; 0 drops straight to contact.
pub const SOFT_DROP_ARR_MS: u32 = 0;

/// Gravity in frames per cell, by level
pub const GRAVITY_FRAMES: [u32; 19] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 4, 4, 3, 3, 2, 2, 1,
];

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;


/// The seven tetromino piece kinds
///
/// The kind is fixed for a piece's lifetime and is what a locked cell
/// remembers, purely for color/identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in canonical order. A fresh 7-bag is a permutation of this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Single uppercase letter, as shown in the preview panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Rotation states
///
/// - **North**: spawn orientation (state 0)
/// - **East**: one quarter turn clockwise (state 1)
/// - **South**: half turn (state 2)
/// - **West**: three quarter turns clockwise (state 3)
///
/// The cycle goes North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Numeric rotation state in `0..4`.
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation state for `index`, wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// ```
    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotate 180°
    pub fn rotate_half(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Target state after turning in `direction`.
    pub fn rotate(self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
            RotateDirection::Half => self.rotate_half(),
        }
    }
}

/// Direction of a rotation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
    /// 180°; only honoured when the ruleset provides a half-turn kick list.
    Half,
}

/// A cell on the game board
///
/// Value-typed and `Copy` so a whole grid can be snapshotted cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PieceKind),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// The kind that last occupied this cell, if any.
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(kind) => Some(kind),
        }
    }
}

impl From<PieceKind> for Cell {
    fn from(kind: PieceKind) -> Self {
        Cell::Occupied(kind)
    }
}

/// Lifecycle phase of an engine instance
///
/// Only `Active` accepts gameplay intents. `GameOver` is one-way; a new game
/// needs a new engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Active,
    Paused,
    GameOver,
}

/// Game actions that can be applied to the engine
///
/// These are the discrete intents a front end produces after key mapping and
/// DAS/ARR handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (+1 point)
    SoftDrop,
    /// Soft drop repeatedly until contact, without locking
    SonicDrop,
    /// Drop to the lowest valid position and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Rotate piece 180° (if the ruleset enables it)
    Rotate180,
    /// Hold current piece (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
}

/// Event emitted after a piece locks.
///
/// Consumed by front ends for secondary effects (line-clear sounds, score
/// popups) so the engine never depends on the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub tspin: bool,
    /// Points awarded by this lock (line clear, back-to-back and drop bonus).
    pub points: u32,
    pub combo: i32,
    pub back_to_back: bool,
    pub hard_drop: bool,
    /// The piece locked with cells above the grid; the game is over.
    pub topped_out: bool,
}
