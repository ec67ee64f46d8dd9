//! Read-only view of a game for presentation layers.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::pieces::PieceShape;
use crate::types::{Cell, Phase, PieceKind, Rotation, MAX_PREVIEW_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Board coordinates, hidden rows included.
    pub cells: PieceShape,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

/// Everything a front end draws in one frame
///
/// `board` holds only the visible rows, row-major. Piece and ghost cells are
/// in board coordinates; use [`GameSnapshot::visible_row`] to map them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub cols: u8,
    pub visible_rows: u8,
    pub hidden_rows: u8,
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub ghost: Option<PieceShape>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: ArrayVec<PieceKind, MAX_PREVIEW_DEPTH>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: i32,
    pub back_to_back: bool,
    pub phase: Phase,
    pub seed: u64,
}

impl GameSnapshot {
    /// Cell at visible coordinates (row 0 is the top visible row)
    pub fn cell(&self, x: u8, row: u8) -> Option<Cell> {
        if x >= self.cols || row >= self.visible_rows {
            return None;
        }
        self.board
            .get(row as usize * self.cols as usize + x as usize)
            .copied()
    }

    /// Map a board row to a visible row; `None` for hidden or out-of-range rows.
    pub fn visible_row(&self, y: i8) -> Option<u8> {
        let row = y as i16 - self.hidden_rows as i16;
        if row < 0 || row >= self.visible_rows as i16 {
            return None;
        }
        Some(row as u8)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cols: 0,
            visible_rows: 0,
            hidden_rows: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            ghost: None,
            hold: None,
            can_hold: true,
            next_queue: ArrayVec::new(),
            score: 0,
            lines: 0,
            level: 0,
            combo: -1,
            back_to_back: false,
            phase: Phase::Active,
            seed: 0,
        }
    }
}
