//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full
//! redraw; later frames only emit runs of changed glyphs.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, GlyphStyle, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame presented, for diffing.
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode plus alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to be a full redraw (e.g. on resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present `fb`, then swap it with the previous frame.
    ///
    /// Callers keep one framebuffer and pass it every frame; after the call it
    /// holds stale content that the next render overwrites.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current_style = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        emit_run(fb, 0, y, fb.width(), &mut current_style, out)?;
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed runs between two same-sized frames into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current_style = None;

    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        emit_run(next, x, y, len, &mut current_style, out)?;
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn emit_run(
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    current_style: &mut Option<GlyphStyle>,
    out: &mut Vec<u8>,
) -> Result<()> {
    for dx in 0..len {
        let glyph = fb.get(x + dx, y).unwrap_or_default();
        if *current_style != Some(glyph.style) {
            apply_style_into(out, glyph.style)?;
            *current_style = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: GlyphStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal runs `(x, y, len)` where `next` differs from `prev`.
///
/// Frames must have the same size.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::GlyphStyle;

    #[test]
    fn changed_runs_coalesce_adjacent_glyphs() {
        let style = GlyphStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);

        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }
        b.put_char(5, 1, 'Y', style);

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn identical_frames_encode_no_glyphs() {
        let a = FrameBuffer::new(4, 4);
        let b = FrameBuffer::new(4, 4);
        assert_eq!(changed_runs(&a, &b).count(), 0);

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains(' '));
    }

    #[test]
    fn full_encode_prints_every_glyph() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.put_str(0, 0, "OK", GlyphStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("OK"));
    }
}
