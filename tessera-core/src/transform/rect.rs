//! Rectangle type shared by the transform and the presentation side

/// Axis-aligned rectangle in pixel units
///
/// `x`/`y` is the top-left corner, `w`/`h` the extent. A rectangle with a
/// zero extent is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    /// Left edge
    pub x: u16,
    /// Top edge
    pub y: u16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// A single pixel
    pub const fn point(x: u16, y: u16) -> Self {
        Self { x, y, w: 1, h: 1 }
    }

    /// Check if the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x as u32 + self.w as u32
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y as u32 + self.h as u32
    }

    /// Check if a pixel lies inside the rectangle
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && (x as u32) < self.right() && y >= self.y && (y as u32) < self.bottom()
    }

    /// Grow this rectangle to the bounding box of both (empty rects are ignored)
    pub fn merge(&mut self, other: &Rect) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        self.x = self.x.min(other.x);
        self.y = self.y.min(other.y);
        self.w = (right - self.x as u32) as u16;
        self.h = (bottom - self.y as u32) as u16;
    }
}
