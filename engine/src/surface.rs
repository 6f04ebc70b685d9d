use crate::graphics::CpuRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// An offscreen RGBA surface for headless rendering and tests.
#[derive(Debug, Clone)]
pub struct RgbaBufferSurface {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl RgbaBufferSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.buf.resize(size.rgba_len(), 0u8);
    }

    pub fn renderer(&mut self) -> CpuRenderer<'_> {
        CpuRenderer::new(&mut self.buf, self.size)
    }

    /// RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = self.buf.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Renderer2d;
    use crate::ui::Rect;

    #[test]
    fn resize_tracks_buffer_length() {
        let mut surface = RgbaBufferSurface::new(SurfaceSize::new(4, 3));
        assert_eq!(surface.frame().len(), 48);

        surface.resize(SurfaceSize::new(2, 2));
        assert_eq!(surface.frame().len(), 16);
        assert!(!surface.size().is_empty());
        assert!(SurfaceSize::new(0, 5).is_empty());
    }

    #[test]
    fn renderer_writes_into_surface() {
        let mut surface = RgbaBufferSurface::new(SurfaceSize::new(4, 4));
        surface
            .renderer()
            .fill_rect(Rect::new(1, 1, 1, 1), [9, 8, 7, 255]);

        assert_eq!(surface.pixel(1, 1), Some([9, 8, 7, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(4, 0), None);
    }
}
