//! Scoring module - line clears, T-spins, back-to-back and drop bonuses
//!
//! Rules:
//! - T-spins score from their own table instead of the line-clear table.
//! - A "difficult" clear is four lines, or a T-spin that clears at least one.
//! - Back-to-back multiplies the clear by 3/2 (floored) when the previous
//!   clear was also difficult, and adds a flat bonus on top.
//! - Hard drop adds two points per row between the landing pivot and the floor.
//! - There is no combo bonus; the combo counter is bookkeeping only.

/// Points for 0..=4 lines without a T-spin
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Back-to-back multiplier, as a fraction
pub const B2B_NUMERATOR: u32 = 3;
pub const B2B_DENOMINATOR: u32 = 2;

/// Flat bonus for keeping a back-to-back chain alive
pub const B2B_FLAT_BONUS: u32 = 50;

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Clear points after the B2B multiplier.
    pub line_clear_score: u32,
    /// Flat chain bonus (0 unless the chain continued).
    pub b2b_bonus: u32,
    pub total: u32,
    /// This clear is difficult and sets the B2B flag.
    pub difficult: bool,
    pub b2b_applied: bool,
}

/// Line clear score without a T-spin
pub fn line_clear_points(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// T-spin score; a T-spin that clears nothing still scores.
pub fn tspin_points(lines: usize) -> u32 {
    match lines {
        1 => 800,
        2 => 1200,
        3 => 1600,
        _ => 400,
    }
}

/// Four lines, or a T-spin with at least one line
pub fn is_difficult(lines: usize, tspin: bool) -> bool {
    lines == 4 || (tspin && lines >= 1)
}

/// Apply the B2B multiplier (3/2) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Score a lock that cleared `lines` rows.
///
/// `previous_b2b` is the flag before this lock. Call only for locks that
/// clear or T-spin; a plain lock with no lines scores nothing.
pub fn calculate_score(lines: usize, tspin: bool, previous_b2b: bool) -> ScoreResult {
    let difficult = is_difficult(lines, tspin);

    let base = if tspin {
        tspin_points(lines)
    } else {
        line_clear_points(lines)
    };

    let b2b_applied = difficult && previous_b2b;
    let line_clear_score = if b2b_applied {
        apply_b2b_multiplier(base)
    } else {
        base
    };
    let b2b_bonus = if lines > 0 && b2b_applied {
        B2B_FLAT_BONUS
    } else {
        0
    };

    ScoreResult {
        line_clear_score,
        b2b_bonus,
        total: line_clear_score.saturating_add(b2b_bonus),
        difficult,
        b2b_applied,
    }
}

/// Hard drop bonus: two points per row from the landing pivot to the floor.
pub fn hard_drop_bonus(rows: u8, final_y: i8) -> u32 {
    let distance = rows as i32 - final_y as i32;
    (distance.max(0) as u32) * 2
}

/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / crate::types::LINES_PER_LEVEL
}

/// Frames per gravity cell for `level`, clamped to the table's last entry.
///
/// An empty table falls back to one frame per cell; validated configs never
/// have one.
pub fn gravity_frames_for(table: &[u32], level: u32) -> u32 {
    let index = (level as usize).min(table.len().saturating_sub(1));
    table.get(index).copied().unwrap_or(1).max(1)
}
