// File: crates/candlebrush-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    /// Rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        Self::from_ltrb(a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
    pub fn is_empty(&self) -> bool { self.width() <= 0.0 || self.height() <= 0.0 }
    /// Clamp a point into the rectangle.
    pub fn clamp_point(&self, x: f32, y: f32) -> (f32, f32) {
        (clamp(x, self.left, self.right), clamp(y, self.top, self.bottom))
    }
    pub fn to_skia(&self) -> skia_safe::Rect {
        skia_safe::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
