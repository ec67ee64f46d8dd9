//! Framebuffer and style types for terminal rendering.

use std::fmt::Write as _;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Per-glyph styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl GlyphStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub fn glyph(self, ch: char) -> Glyph {
        Glyph { ch, style: self }
    }
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One terminal character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: GlyphStyle,
}

impl Default for Glyph {
    fn default() -> Self {
        GlyphStyle::default().glyph(' ')
    }
}

/// 2D framebuffer of styled glyphs, row-major.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
    /// Scratch space for number formatting.
    scratch: String,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
            scratch: String::with_capacity(16),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(width as usize * height as usize, Glyph::default());
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.idx(x, y).map(|i| self.glyphs[i])
    }

    /// Out-of-range writes are clipped.
    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.idx(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn clear(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: GlyphStyle) {
        self.set(x, y, style.glyph(ch));
    }

    /// Write `s` left to right, clipped at the right edge.
    /// Returns the column after the last character.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: GlyphStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
        cx
    }

    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: GlyphStyle) -> u16 {
        self.put_display(x, y, value, style)
    }

    pub fn put_i32(&mut self, x: u16, y: u16, value: i32, style: GlyphStyle) -> u16 {
        self.put_display(x, y, value, style)
    }

    fn put_display(&mut self, x: u16, y: u16, value: impl std::fmt::Display, style: GlyphStyle) -> u16 {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        let _ = write!(scratch, "{value}");
        let end = self.put_str(x, y, &scratch, style);
        self.scratch = scratch;
        end
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: GlyphStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Row `y` as a plain string, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips_at_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        let end = fb.put_str(2, 0, "abc", GlyphStyle::default());
        assert_eq!(end, 4);
        assert_eq!(fb.row_text(0), "  ab");
    }

    #[test]
    fn test_put_numbers() {
        let mut fb = FrameBuffer::new(8, 2);
        fb.put_u32(0, 0, 1250, GlyphStyle::default());
        fb.put_i32(0, 1, -1, GlyphStyle::default());
        assert_eq!(fb.row_text(0), "1250    ");
        assert_eq!(fb.row_text(1), "-1      ");
    }

    #[test]
    fn test_resize_and_out_of_range() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set(5, 5, Glyph::default());
        assert_eq!(fb.get(5, 5), None);
        fb.resize(3, 1);
        assert_eq!(fb.glyphs().len(), 3);
    }
}
