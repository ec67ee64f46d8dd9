//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid where each cell is empty or remembers
//! the kind that locked into it. Rows include the hidden buffer at the top;
//! only the bottom `visible_rows` are shown to the player.
//! Uses a flat row-major array for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Cells above row 0 are legal for a falling piece (it may spawn partially
//! above the grid) but can never be locked.

use crate::piece::Piece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: u8,
    rows: u8,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Empty; cols as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.cols as i8 || y < 0 || y >= self.rows as i8 {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.cols
    }

    /// Get height of the board, hidden rows included
    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Occupied(_)))
    }

    /// Occupied, or outside the grid on any side.
    ///
    /// This is the corner test used for T-spin detection, where the grid
    /// boundary counts as filled.
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Whether any of `cells` is illegal for a falling piece.
    ///
    /// A cell collides if it is left/right of the walls, at or below the
    /// floor, or on top of a locked cell. Cells above row 0 only collide with
    /// the walls.
    pub fn collides(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().any(|&(x, y)| {
            if x < 0 || x >= self.cols as i8 || y >= self.rows as i8 {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_occupied()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.rows as usize {
            return None;
        }
        let start = y * self.cols as usize;
        Some(&self.cells[start..start + self.cols as usize])
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols as usize)
    }

    /// Lock a piece into the grid at its current pose.
    ///
    /// Cells inside the grid take the piece's kind. Returns false if any cell
    /// was above the top row; those cells are not written and the caller must
    /// treat the lock as a top-out.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let mut fits = true;
        for (x, y) in piece.cells() {
            if y < 0 {
                fits = false;
                continue;
            }
            self.set(x, y, Cell::Occupied(piece.kind));
        }
        fits
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Remaining rows keep their order and sink to the bottom; the same number
    /// of empty rows appears at the top. Two-pointer scan, no allocation.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.cols as usize;
        let height = self.rows as usize;
        let mut cleared = 0;
        let mut write_y = height;

        // Scan from bottom to top
        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(Cell::Empty);

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Fill row `y` completely except for the columns in `holes`.
    pub fn fill_row(&mut self, y: i8, kind: PieceKind, holes: &[i8]) {
        for x in 0..self.cols as i8 {
            if !holes.contains(&x) {
                self.set(x, y, Cell::Occupied(kind));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
