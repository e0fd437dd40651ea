use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Same size, origin moved by `delta`.
    #[inline]
    pub fn translated(self, delta: Vec2) -> Rect {
        Rect::from_origin_size(self.origin + delta, self.size)
    }

    /// Same size, origin replaced.
    #[inline]
    pub fn with_origin(self, origin: Vec2) -> Rect {
        Rect::from_origin_size(origin, self.size)
    }

    /// Same origin, size replaced.
    #[inline]
    pub fn with_size(self, size: Vec2) -> Rect {
        Rect::from_origin_size(self.origin, size)
    }
}
