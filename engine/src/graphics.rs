use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

// 3x5 block font, scaled up by an integer factor.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel size of `text` rendered at `scale` (single line; no trailing gap).
pub fn measure_text(text: &str, scale: u32) -> (u32, u32) {
    let scale = scale.max(1);
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return (0, 0);
    }
    let w = chars
        .saturating_mul(glyph_advance_x(scale))
        .saturating_sub(scale);
    (w, GLYPH_H * scale)
}

/// Largest integer scale at which `text` fits inside `max_w` x `max_h`, at least 1.
pub fn fit_text_scale(text: &str, max_w: u32, max_h: u32) -> u32 {
    let (w1, h1) = measure_text(text, 1);
    if w1 == 0 || h1 == 0 {
        return 1;
    }
    // Text size is linear in scale.
    let by_w = max_w / w1;
    let by_h = max_h / h1;
    by_w.min(by_h).max(1)
}

/// 2D drawing interface the game renders through.
///
/// Implementations decide where the pixels go; game code never touches the buffer directly.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended rect over existing content (alpha is applied to `color`'s RGB).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    /// Outline of `rect` drawn `thickness` pixels inward from its edges.
    fn rect_outline(&mut self, rect: Rect, color: Color, thickness: u32) {
        if rect.w == 0 || rect.h == 0 || thickness == 0 {
            return;
        }
        let t_w = thickness.min(rect.w);
        let t_h = thickness.min(rect.h);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t_h), color);
        self.fill_rect(
            Rect::new(rect.x, rect.y + rect.h - t_h, rect.w, t_h),
            color,
        );
        self.fill_rect(Rect::new(rect.x, rect.y, t_w, rect.h), color);
        self.fill_rect(
            Rect::new(rect.x + rect.w - t_w, rect.y, t_w, rect.h),
            color,
        );
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Clips `rect` to the surface and returns `(row_start, row_bytes, stride, rows)`,
    /// or `None` when nothing is visible or the buffer is too small for the surface.
    fn clip(&self, rect: Rect) -> Option<(usize, usize, usize, u32)> {
        let width = self.size.width;
        let height = self.size.height;

        let max_x = rect.x.saturating_add(rect.w).min(width);
        let max_y = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= max_x || rect.y >= max_y {
            return None;
        }
        if self.size.rgba_len() == 0 || self.frame.len() < self.size.rgba_len() {
            return None;
        }

        let stride = (width as usize).checked_mul(4)?;
        let row_bytes = ((max_x - rect.x) as usize).checked_mul(4)?;
        let row_start = (rect.y as usize)
            .checked_mul(stride)?
            .checked_add((rect.x as usize).checked_mul(4)?)?;
        Some((row_start, row_bytes, stride, max_y - rect.y))
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((mut row_start, row_bytes, stride, rows)) = self.clip(rect) else {
            return;
        };

        for _ in 0..rows {
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
            row_start += stride;
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.fill_rect(rect, color);
            return;
        }
        let Some((mut row_start, row_bytes, stride, rows)) = self.clip(rect) else {
            return;
        };

        let a = alpha as u32;
        let inv = 255u32 - a;
        for _ in 0..rows {
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                for c in 0..3 {
                    px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                }
                px[3] = 255;
            }
            row_start += stride;
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);
        let adv_y = line_advance_y(scale);

        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(adv_y);
                    if cursor_y >= self.size.height {
                        break;
                    }
                    continue;
                }
                ' ' => {
                    cursor_x = cursor_x.saturating_add(adv_x);
                    continue;
                }
                _ => {}
            }

            for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
                let py = cursor_y.saturating_add((row as u32).saturating_mul(scale));
                for col in 0..GLYPH_W {
                    if bits & (1u8 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    let px = cursor_x.saturating_add(col.saturating_mul(scale));
                    self.fill_rect(Rect::new(px, py, scale, scale), color);
                }
            }

            cursor_x = cursor_x.saturating_add(adv_x);
            if cursor_x >= self.size.width {
                break;
            }
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}
