//! The falling piece.

use crate::pieces::{cells_at, PieceShape};
use crate::types::{PieceKind, Rotation};

/// Active falling piece
///
/// Owned by the game and replaced (never mutated across spawns) on each
/// spawn, hold swap, lock or game over. Only the pose moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at `(x, y)` in the spawn orientation
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Absolute cells at the current pose
    pub fn cells(&self) -> PieceShape {
        cells_at(self.kind, self.rotation, self.x, self.y)
    }

    /// Absolute cells for a hypothetical pose, used to probe before committing.
    pub fn cells_at(&self, rotation: Rotation, x: i8, y: i8) -> PieceShape {
        cells_at(self.kind, rotation, x, y)
    }

    /// The same piece translated by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_new() {
        let piece = Piece::new(PieceKind::T, 4, 0);
        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!((piece.x, piece.y), (4, 0));
    }

    #[test]
    fn test_cells_translate_shape() {
        let piece = Piece::new(PieceKind::I, 4, 0);
        assert_eq!(piece.cells(), [(3, 0), (4, 0), (5, 0), (6, 0)]);
    }

    #[test]
    fn test_cells_at_does_not_touch_pose() {
        let piece = Piece::new(PieceKind::T, 4, 5);
        let probed = piece.cells_at(Rotation::South, 2, 7);
        assert_eq!(probed, [(3, 7), (2, 7), (1, 7), (2, 8)]);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!((piece.x, piece.y), (4, 5));
    }

    #[test]
    fn test_shifted() {
        let piece = Piece::new(PieceKind::O, 4, 0).shifted(-1, 2);
        assert_eq!((piece.x, piece.y), (3, 2));
        assert_eq!(piece.cells(), [(3, 2), (4, 2), (3, 1), (4, 1)]);
    }
}
