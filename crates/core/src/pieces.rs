//! Pieces module - Tetromino shapes and SRS rotation system
//!
//! Shapes are stored once, at rotation 0, as four offsets around a pivot
//! (y grows downward). Every other orientation is derived by applying the
//! quarter-turn transform `(x, y) -> (y, -x)` once per rotation step.
//!
//! Wall kicks follow the Super Rotation System: each quarter-turn transition
//! has an ordered list of candidate offsets, tried first to last.
//! Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, RotateDirection, Rotation};

/// Offset of a single mino relative to the piece pivot
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the pivot
pub type PieceShape = [MinoOffset; 4];

/// Spawn-orientation offsets for a piece kind
pub fn base_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(-1, 0), (0, 0), (1, 0), (1, -1)],
        PieceKind::O => [(0, 0), (1, 0), (0, -1), (1, -1)],
        PieceKind::S => [(-1, 0), (0, 0), (0, -1), (1, -1)],
        PieceKind::T => [(-1, 0), (0, 0), (1, 0), (0, -1)],
        PieceKind::Z => [(-1, -1), (0, -1), (0, 0), (1, 0)],
    }
}

/// Apply the quarter-turn transform `rotation.index()` times.
#[inline]
pub fn rotate_offset(offset: MinoOffset, rotation: Rotation) -> MinoOffset {
    let (mut x, mut y) = offset;
    for _ in 0..rotation.index() {
        (x, y) = (y, -x);
    }
    (x, y)
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    base_shape(kind).map(|offset| rotate_offset(offset, rotation))
}

/// Absolute cells of `kind` at `rotation` with its pivot on `(x, y)`.
pub fn cells_at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> PieceShape {
    get_shape(kind, rotation).map(|(dx, dy)| (x + dx, y + dy))
}

/// SRS wall kick data
///
/// Indexed by [`kick_index`]; each row is the ordered candidate list for
/// one quarter-turn transition.
pub type KickTable = [[MinoOffset; 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
pub const JLSTZ_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table (its pivot sits off-center)
pub const I_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Extended 180° candidates, shared by every kind.
pub const HALF_TURN_KICKS: [MinoOffset; 29] = [
    (0, 0),
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (2, 0),
    (-2, 0),
    (0, 2),
    (0, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
    (3, 0),
    (-3, 0),
    (0, 3),
    (0, -3),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 2),
    (-2, 2),
    (2, -2),
    (-2, -2),
];

/// Row of a [`KickTable`] for a quarter-turn transition.
///
/// Returns `None` for 0° and 180° transitions, which have no table row.
pub fn kick_index(from: Rotation, to: Rotation) -> Option<usize> {
    use Rotation::*;
    match (from, to) {
        (North, East) => Some(0),
        (North, West) => Some(1),
        (East, North) => Some(2),
        (East, South) => Some(3),
        (South, East) => Some(4),
        (South, West) => Some(5),
        (West, South) => Some(6),
        (West, North) => Some(7),
        _ => None,
    }
}

/// The kick data a ruleset rotates with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KickTables {
    pub jlstz: KickTable,
    pub i: KickTable,
    /// Candidates for 180° turns; `None` disables half turns.
    pub half_turn: Option<Vec<MinoOffset>>,
}

impl KickTables {
    /// Standard SRS quarter turns, no 180° rotation.
    pub fn srs() -> Self {
        Self {
            jlstz: JLSTZ_KICKS,
            i: I_KICKS,
            half_turn: None,
        }
    }

    /// Standard SRS plus the extended 180° list.
    pub fn srs_with_half_turns() -> Self {
        Self {
            half_turn: Some(HALF_TURN_KICKS.to_vec()),
            ..Self::srs()
        }
    }

    /// Ordered candidates for turning `kind` from `from` to `to`.
    ///
    /// Empty when the turn is not allowed: O pieces never rotate, and 180°
    /// turns need a half-turn list.
    pub fn candidates(&self, kind: PieceKind, from: Rotation, to: Rotation) -> &[MinoOffset] {
        if kind == PieceKind::O {
            return &[];
        }
        if from.rotate_half() == to {
            return self.half_turn.as_deref().unwrap_or(&[]);
        }
        let Some(index) = kick_index(from, to) else {
            return &[];
        };
        match kind {
            PieceKind::I => &self.i[index],
            _ => &self.jlstz[index],
        }
    }
}

impl Default for KickTables {
    fn default() -> Self {
        Self::srs()
    }
}

/// Outcome of a successful kicked rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Offset that was applied.
    pub kick: MinoOffset,
    /// Position of that offset in the candidate list (0 = in place).
    pub kick_index: usize,
}

/// Try to rotate a piece with wall kicks
///
/// Candidates are tried in table order and the first one for which
/// `collides` is false wins. Returns `None` if every candidate collides
/// (or the turn is not allowed), in which case nothing should change.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    direction: RotateDirection,
    tables: &KickTables,
    collides: impl Fn(&PieceShape) -> bool,
) -> Option<Rotated> {
    let target = rotation.rotate(direction);

    tables
        .candidates(kind, rotation, target)
        .iter()
        .enumerate()
        .find_map(|(kick_index, &(dx, dy))| {
            let (nx, ny) = (x.checked_add(dx)?, y.checked_add(dy)?);
            if collides(&cells_at(kind, target, nx, ny)) {
                None
            } else {
                Some(Rotated {
                    rotation: target,
                    x: nx,
                    y: ny,
                    kick: (dx, dy),
                    kick_index,
                })
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_four_distinct_offsets_in_every_rotation() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let shape = get_shape(kind, Rotation::from_index(r));
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{kind:?} r{r}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for kind in PieceKind::ALL {
            for offset in base_shape(kind) {
                let mut o = offset;
                for _ in 0..4 {
                    o = rotate_offset(o, Rotation::East);
                }
                assert_eq!(o, offset);
            }
        }
    }

    #[test]
    fn test_t_rotations() {
        assert_eq!(
            get_shape(PieceKind::T, Rotation::East),
            [(0, 1), (0, 0), (0, -1), (-1, 0)]
        );
        assert_eq!(
            get_shape(PieceKind::T, Rotation::South),
            [(1, 0), (0, 0), (-1, 0), (0, 1)]
        );
        assert_eq!(
            get_shape(PieceKind::T, Rotation::West),
            [(0, -1), (0, 0), (0, 1), (1, 0)]
        );
    }

    #[test]
    fn test_every_kick_row_starts_in_place() {
        for row in JLSTZ_KICKS.iter().chain(I_KICKS.iter()) {
            assert_eq!(row[0], (0, 0));
        }
        assert_eq!(HALF_TURN_KICKS[0], (0, 0));
    }

    #[test]
    fn test_kick_index_only_for_quarter_turns() {
        for r in 0..4 {
            let from = Rotation::from_index(r);
            assert!(kick_index(from, from).is_none());
            assert!(kick_index(from, from.rotate_half()).is_none());
            assert!(kick_index(from, from.rotate_cw()).is_some());
            assert!(kick_index(from, from.rotate_ccw()).is_some());
        }
    }

    #[test]
    fn test_o_piece_has_no_candidates() {
        let tables = KickTables::srs_with_half_turns();
        assert!(tables
            .candidates(PieceKind::O, Rotation::North, Rotation::East)
            .is_empty());
        assert!(tables
            .candidates(PieceKind::O, Rotation::North, Rotation::South)
            .is_empty());
    }

    #[test]
    fn test_half_turns_disabled_by_default() {
        let tables = KickTables::default();
        assert!(tables
            .candidates(PieceKind::T, Rotation::North, Rotation::South)
            .is_empty());
        assert!(try_rotate(
            PieceKind::T,
            Rotation::North,
            4,
            10,
            RotateDirection::Half,
            &tables,
            |_| false
        )
        .is_none());
    }

    #[test]
    fn test_try_rotate_prefers_in_place() {
        let r = try_rotate(
            PieceKind::J,
            Rotation::North,
            4,
            10,
            RotateDirection::Clockwise,
            &KickTables::srs(),
            |_| false,
        )
        .unwrap();
        assert_eq!(r.rotation, Rotation::East);
        assert_eq!((r.x, r.y), (4, 10));
        assert_eq!(r.kick_index, 0);
    }

    #[test]
    fn test_try_rotate_skips_candidates_that_would_wrap() {
        let tables = KickTables {
            half_turn: Some(vec![(127, 0), (0, 0)]),
            ..KickTables::srs()
        };
        let r = try_rotate(
            PieceKind::T,
            Rotation::North,
            4,
            10,
            RotateDirection::Half,
            &tables,
            |_| false,
        )
        .unwrap();
        assert_eq!((r.x, r.y), (4, 10));
        assert_eq!(r.kick_index, 1);
    }

    #[test]
    fn test_try_rotate_uses_i_table_for_i() {
        // Reject only the in-place candidate.
        let r = try_rotate(
            PieceKind::I,
            Rotation::North,
            4,
            10,
            RotateDirection::Clockwise,
            &KickTables::srs(),
            |cells| cells == &cells_at(PieceKind::I, Rotation::East, 4, 10),
        )
        .unwrap();
        assert_eq!(r.kick, (-2, 0));
        assert_eq!(r.kick_index, 1);
    }
}
