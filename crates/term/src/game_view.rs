//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O) so it can be unit-tested. Only visible rows are drawn;
//! piece cells in the hidden buffer are skipped.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{Cell, Phase, PieceKind};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal renderer for one game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Screen origin of the playfield frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Reusing one framebuffer across frames keeps this allocation-free.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(GlyphStyle::default().glyph(' '));

        let w = snap.cols as u16 * self.cell_w + 2;
        let h = snap.visible_rows as u16 * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(fb, frame);

        // Locked cells.
        let empty = GlyphStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        for row in 0..snap.visible_rows {
            for x in 0..snap.cols {
                match snap.cell(x, row) {
                    Some(Cell::Occupied(kind)) => self.draw_block(fb, frame, x, row, kind),
                    _ => self.fill_cell(fb, frame, x, row, '·', empty),
                }
            }
        }

        // Ghost, then the active piece on top of it.
        if let (Some(active), Some(ghost)) = (snap.active, snap.ghost) {
            let style = GlyphStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            for (x, y) in ghost {
                if let Some(row) = snap.visible_row(y) {
                    self.fill_cell(fb, frame, x as u8, row, '░', style);
                }
            }
            for (x, y) in active.cells {
                if let Some(row) = snap.visible_row(y) {
                    self.draw_block(fb, frame, x as u8, row, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            Phase::Paused => self.draw_overlay_text(fb, frame, "PAUSED"),
            Phase::GameOver => self.draw_overlay_text(fb, frame, "GAME OVER"),
            Phase::Active => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
        let style = GlyphStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u8, row: u8, kind: PieceKind) {
        let style = GlyphStyle::new(piece_color(kind), PLAYFIELD_BG).bold();
        self.fill_cell(fb, frame, x, row, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u8, row: u8, ch: char, style: GlyphStyle) {
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = GlyphStyle::default().bold();
        let value = GlyphStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let dim = value.dim();

        let mut y = frame.y;
        for (name, number) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "COMBO", label);
        if snap.combo > 0 {
            fb.put_i32(panel_x, y + 1, snap.combo, value);
        } else {
            fb.put_str(panel_x, y + 1, "-", value);
        }
        if snap.back_to_back {
            fb.put_str(panel_x + 6, y + 1, "B2B", label);
        }
        y += 3;

        fb.put_str(panel_x, y, "HOLD", label);
        let hold = snap.hold.map(|k| k.as_str()).unwrap_or("-");
        fb.put_str(panel_x, y + 1, hold, if snap.can_hold { value } else { dim });
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for kind in &snap.next_queue {
            if y >= viewport.height {
                break;
            }
            let style = GlyphStyle::new(piece_color(*kind), SCREEN_BG);
            fb.put_str(panel_x, y, kind.as_str(), style);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = GlyphStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    #[test]
    fn frame_is_centered_and_sized_to_visible_rows() {
        let snap = GameState::new(1).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));

        // 10 cols * 2 + 2 border = 22 wide, 20 rows + 2 = 22 high.
        let x = (80 - 22) / 2;
        let y = (24 - 22) / 2;
        assert_eq!(fb.get(x, y).map(|g| g.ch), Some('┌'));
        assert_eq!(fb.get(x + 21, y + 21).map(|g| g.ch), Some('┘'));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameState::new(1).snapshot();
        let fb = GameView::new(0, 0).render(&snap, Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
