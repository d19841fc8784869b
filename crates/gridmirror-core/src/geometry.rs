//! Geometry primitives shared by the solver and the scene synchronizer

/// Pixel dimensions of a capture source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A 0×0 source is not rendered yet; no layout can be derived from it
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in source pixel space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrink by `amount` on all four sides
    pub fn inset(&self, amount: f64) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width - 2.0 * amount,
            height: self.height - 2.0 * amount,
        }
    }
}

/// Crop applied to a scene element, in whole source pixels removed per edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Crop {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Crop {
    #[inline]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Scene element scale; the sign of `x` encodes horizontal mirroring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.x.is_sign_negative()
    }

    /// Same magnitude, sign chosen by `mirrored`
    pub fn with_mirror(self, mirrored: bool) -> Scale {
        let magnitude = self.x.abs();
        Scale {
            x: if mirrored { -magnitude } else { magnitude },
            y: self.y,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}
