//! Layout primitives: a `Rect` plus helpers for insets, anchored placement and
//! uniform grid subdivision.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }

    /// Returns the rectangle inset by `insets` (i.e. the inner content area).
    ///
    /// If insets exceed the rect size, the resulting width/height will saturate to 0.
    pub fn inset(&self, insets: Insets) -> Self {
        let w = self
            .w
            .saturating_sub(insets.left.saturating_add(insets.right));
        let h = self
            .h
            .saturating_sub(insets.top.saturating_add(insets.bottom));
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w,
            h,
        }
    }

    /// Places a child of `size` inside this rect using the requested `anchor`.
    ///
    /// If `size` exceeds this rect, it is clamped to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);

        let x = match anchor {
            Anchor::TopLeft | Anchor::BottomLeft => self.x,
            Anchor::TopCenter | Anchor::Center => {
                self.x.saturating_add(self.w.saturating_sub(w) / 2)
            }
        };

        let y = match anchor {
            Anchor::TopLeft | Anchor::TopCenter => self.y,
            Anchor::Center => self.y.saturating_add(self.h.saturating_sub(h) / 2),
            Anchor::BottomLeft => self.y.saturating_add(self.h.saturating_sub(h)),
        };

        Self { x, y, w, h }
    }

    /// Cell `(row, col)` of this rect split into a `rows x cols` grid.
    ///
    /// Cell edges are computed from the full extent so rounding never leaves a gap at the
    /// right or bottom edge; `rows`/`cols` of zero yield an empty rect.
    pub fn grid_cell(&self, rows: usize, cols: usize, row: usize, col: usize) -> Self {
        if rows == 0 || cols == 0 || row >= rows || col >= cols {
            return Self::new(self.x, self.y, 0, 0);
        }
        let edge = |extent: u32, parts: usize, i: usize| -> u32 {
            ((extent as u64 * i as u64) / parts as u64) as u32
        };
        let x0 = edge(self.w, cols, col);
        let x1 = edge(self.w, cols, col + 1);
        let y0 = edge(self.h, rows, row);
        let y1 = edge(self.h, rows, row + 1);
        Self {
            x: self.x.saturating_add(x0),
            y: self.y.saturating_add(y0),
            w: x1 - x0,
            h: y1 - y0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    Center,
    BottomLeft,
}
