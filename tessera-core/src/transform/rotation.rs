//! Rotation transform
//!
//! Maps logical (caller-facing) coordinates to physical frame-buffer
//! coordinates. Every orientation is realised by the same three steps,
//! applied in this order:
//!
//! 1. Reflect the vertical axis when the internal rotation is 1, 2, 4 or 7
//! 2. Reflect the horizontal axis when bit 1 of the rotation is set
//! 3. Swap the axes when bit 0 of the rotation is set
//!
//! Reflections are computed against the *logical* dimensions because the
//! swap happens last.

use super::rect::Rect;

/// Internal rotations that reflect the vertical axis (1, 2, 4, 7)
const FLIP_Y_MASK: u8 = 0b1001_0110;

/// Internal rotation code (0-3 quarter turns, bit 2 = mirror)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rotation(u8);

impl Rotation {
    /// No rotation, no mirror
    pub const IDENTITY: Self = Self(0);

    /// Combine a caller rotation (0-7) with the device mounting offset
    pub const fn from_external(rotation: u8, offset: u8) -> Self {
        let r = rotation & 7;
        let o = offset & 7;
        Self(((r + o) & 3) | ((r & 4) ^ (o & 4)))
    }

    /// Raw internal code (0-7)
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Check for the untransformed orientation
    pub const fn is_identity(self) -> bool {
        self.0 == 0
    }

    /// Step 1: vertical axis is reflected
    pub const fn flips_y(self) -> bool {
        (1u8 << self.0) & FLIP_Y_MASK != 0
    }

    /// Step 2: horizontal axis is reflected
    pub const fn flips_x(self) -> bool {
        self.0 & 2 != 0
    }

    /// Step 3: axes are swapped (90/270 degree turn)
    pub const fn swaps_axes(self) -> bool {
        self.0 & 1 != 0
    }
}

/// Orientation state of a panel
///
/// Holds the physical panel size together with the current rotation and
/// the logical size callers draw against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    panel_width: u16,
    panel_height: u16,
    offset: u8,
    rotation: u8,
    internal: Rotation,
    width: u16,
    height: u16,
}

impl Orientation {
    /// Create an orientation for a panel, starting at rotation 0
    pub fn new(panel_width: u16, panel_height: u16, offset: u8) -> Self {
        let mut o = Self {
            panel_width,
            panel_height,
            offset: offset & 7,
            rotation: 0,
            internal: Rotation::IDENTITY,
            width: panel_width,
            height: panel_height,
        };
        o.set_rotation(0);
        o
    }

    /// Select a caller rotation (0-7) and recompute the logical size
    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation & 7;
        self.internal = Rotation::from_external(self.rotation, self.offset);
        if self.internal.swaps_axes() {
            self.width = self.panel_height;
            self.height = self.panel_width;
        } else {
            self.width = self.panel_width;
            self.height = self.panel_height;
        }
    }

    /// Caller-facing rotation (0-7)
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Derived internal rotation
    pub const fn internal(&self) -> Rotation {
        self.internal
    }

    /// Logical width
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Logical height
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Physical width (frame-buffer row length in pixels)
    pub const fn panel_width(&self) -> u16 {
        self.panel_width
    }

    /// Physical height
    pub const fn panel_height(&self) -> u16 {
        self.panel_height
    }

    /// Reflect a logical x coordinate (point semantics)
    pub const fn reflect_x(&self, x: u16) -> u16 {
        self.width - (x + 1)
    }

    /// Reflect a logical y coordinate (point semantics)
    pub const fn reflect_y(&self, y: u16) -> u16 {
        self.height - (y + 1)
    }

    /// Signed logical-axis steps `(ax, ay)` for walking a scanline
    ///
    /// A reflected axis walks backwards. The caller swaps the pair itself
    /// when [`Rotation::swaps_axes`] is set.
    pub const fn steps(&self) -> (i32, i32) {
        let ax = if self.internal.flips_x() { -1 } else { 1 };
        let ay = if self.internal.flips_y() { -1 } else { 1 };
        (ax, ay)
    }

    /// Map a logical point to physical frame-buffer coordinates
    pub const fn point(&self, x: u16, y: u16) -> (u16, u16) {
        let r = self.internal;
        if r.is_identity() {
            return (x, y);
        }
        let mut x = x;
        let mut y = y;
        if r.flips_y() {
            y = self.reflect_y(y);
        }
        if r.flips_x() {
            x = self.reflect_x(x);
        }
        if r.swaps_axes() {
            (y, x)
        } else {
            (x, y)
        }
    }

    /// Map a logical rectangle to its physical frame-buffer footprint
    ///
    /// The far edge is reflected, so `y` becomes `height - (y + h)` rather
    /// than the point form `height - 1 - y`.
    pub const fn rect(&self, rect: Rect) -> Rect {
        let r = self.internal;
        if r.is_identity() {
            return rect;
        }
        let Rect {
            mut x,
            mut y,
            w,
            h,
        } = rect;
        if r.flips_y() {
            y = self.height - (y + h);
        }
        if r.flips_x() {
            x = self.width - (x + w);
        }
        if r.swaps_axes() {
            Rect::new(y, x, h, w)
        } else {
            Rect::new(x, y, w, h)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: u16 = 8;
    const H: u16 = 5;

    #[test]
    fn test_from_external_without_offset() {
        for r in 0..8 {
            assert_eq!(Rotation::from_external(r, 0).code(), r);
        }
        // Only the low three bits are significant
        assert_eq!(Rotation::from_external(9, 0).code(), 1);
    }

    #[test]
    fn test_from_external_with_offset() {
        // Quarter turns wrap within 0-3
        assert_eq!(Rotation::from_external(3, 1).code(), 0);
        assert_eq!(Rotation::from_external(2, 3).code(), 1);
        // Mirror bits cancel
        assert_eq!(Rotation::from_external(4, 4).code(), 0);
        assert_eq!(Rotation::from_external(5, 6).code(), 3);
        assert_eq!(Rotation::from_external(1, 4).code(), 5);
    }

    #[test]
    fn test_flip_y_set() {
        let flipped: [bool; 8] = core::array::from_fn(|r| Rotation(r as u8).flips_y());
        assert_eq!(
            flipped,
            [false, true, true, false, true, false, false, true]
        );
    }

    #[test]
    fn test_dimensions_swap_on_odd_rotation() {
        let mut o = Orientation::new(480, 272, 0);
        assert_eq!((o.width(), o.height()), (480, 272));

        o.set_rotation(1);
        assert_eq!((o.width(), o.height()), (272, 480));

        o.set_rotation(6);
        assert_eq!((o.width(), o.height()), (480, 272));

        o.set_rotation(7);
        assert_eq!((o.width(), o.height()), (272, 480));
    }

    #[test]
    fn test_offset_rotation_swaps_dimensions() {
        let o = Orientation::new(480, 272, 1);
        assert_eq!(o.internal().code(), 1);
        assert_eq!((o.width(), o.height()), (272, 480));
    }

    #[test]
    fn test_point_mapping_per_rotation() {
        let mut o = Orientation::new(W, H, 0);
        // Logical (1, 0) under each rotation
        let expected = [
            (1, 0), // 0: identity
            (7, 1), // 1: y reflected against logical height 8, then swapped
            (6, 4), // 2: both axes reflected
            (0, 3), // 3: x reflected against logical width 5, then swapped
            (1, 4), // 4: y reflected
            (0, 1), // 5: transpose
            (6, 0), // 6: x reflected
            (7, 3), // 7: both reflected, then swapped
        ];
        for (r, want) in expected.iter().enumerate() {
            o.set_rotation(r as u8);
            assert_eq!(o.point(1, 0), *want, "rotation {}", r);
        }
    }

    #[test]
    fn test_rect_reflects_far_edge() {
        let mut o = Orientation::new(W, H, 0);
        o.set_rotation(2);
        // 3x2 block at (1, 1) lands at (8 - 4, 5 - 3)
        assert_eq!(o.rect(Rect::new(1, 1, 3, 2)), Rect::new(4, 2, 3, 2));

        o.set_rotation(1);
        // Logical 5x8: y reflected against 8, then swapped
        assert_eq!(o.rect(Rect::new(1, 1, 3, 2)), Rect::new(5, 1, 2, 3));
    }

    #[test]
    fn test_rect_single_pixel_matches_point() {
        let mut o = Orientation::new(W, H, 0);
        for r in 0..8 {
            o.set_rotation(r);
            for y in 0..o.height() {
                for x in 0..o.width() {
                    let (px, py) = o.point(x, y);
                    assert_eq!(o.rect(Rect::point(x, y)), Rect::point(px, py));
                }
            }
        }
    }

    #[test]
    fn test_steps() {
        let mut o = Orientation::new(W, H, 0);
        o.set_rotation(0);
        assert_eq!(o.steps(), (1, 1));
        o.set_rotation(2);
        assert_eq!(o.steps(), (-1, -1));
        o.set_rotation(6);
        assert_eq!(o.steps(), (-1, 1));
        o.set_rotation(4);
        assert_eq!(o.steps(), (1, -1));
    }

    proptest! {
        #[test]
        fn prop_point_is_bijective(rotation in 0u8..8, offset in 0u8..8) {
            let mut o = Orientation::new(W, H, offset);
            o.set_rotation(rotation);
            let mut seen = [[false; W as usize]; H as usize];
            for y in 0..o.height() {
                for x in 0..o.width() {
                    let (px, py) = o.point(x, y);
                    prop_assert!(px < W && py < H);
                    prop_assert!(!seen[py as usize][px as usize]);
                    seen[py as usize][px as usize] = true;
                }
            }
        }

        #[test]
        fn prop_rect_stays_in_panel(
            rotation in 0u8..8,
            x in 0u16..5, y in 0u16..5, w in 1u16..4, h in 1u16..4,
        ) {
            let mut o = Orientation::new(W, W, 0);
            o.set_rotation(rotation);
            let r = o.rect(Rect::new(x, y, w, h));
            prop_assert_eq!(r.w as u32 * r.h as u32, w as u32 * h as u32);
            prop_assert!(r.right() <= W as u32 && r.bottom() <= W as u32);
        }
    }
}
