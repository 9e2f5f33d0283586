//! Active window and write cursor

/// Caller-declared window with its write cursor
///
/// Bounds are inclusive and logical. Cursor writes advance left to right,
/// wrap to the next row at `xe` and back to `ys` after `ye`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    /// Left edge
    pub xs: u16,
    /// Top edge
    pub ys: u16,
    /// Right edge (inclusive)
    pub xe: u16,
    /// Bottom edge (inclusive)
    pub ye: u16,
    /// Cursor column
    pub xpos: u16,
    /// Cursor row
    pub ypos: u16,
}

impl Window {
    /// Window covering a whole `width` x `height` area
    pub const fn full(width: u16, height: u16) -> Self {
        Self::clamped(0, 0, u16::MAX, u16::MAX, width, height)
    }

    /// Window clamped to a `width` x `height` area, cursor at its origin
    ///
    /// Reversed bounds are put back in order.
    pub const fn clamped(xs: u16, ys: u16, xe: u16, ye: u16, width: u16, height: u16) -> Self {
        let (xs, xe) = order(clamp(xs, width), clamp(xe, width));
        let (ys, ye) = order(clamp(ys, height), clamp(ye, height));
        Self {
            xs,
            ys,
            xe,
            ye,
            xpos: xs,
            ypos: ys,
        }
    }

    /// Columns per row
    pub const fn width(&self) -> u16 {
        self.xe - self.xs + 1
    }

    /// Rows
    pub const fn height(&self) -> u16 {
        self.ye - self.ys + 1
    }

    /// Cursor position
    pub const fn cursor(&self) -> (u16, u16) {
        (self.xpos, self.ypos)
    }
}

const fn clamp(v: u16, dim: u16) -> u16 {
    let max = dim.saturating_sub(1);
    if v > max {
        max
    } else {
        v
    }
}

const fn order(a: u16, b: u16) -> (u16, u16) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_window() {
        let w = Window::full(480, 272);
        assert_eq!((w.xs, w.ys, w.xe, w.ye), (0, 0, 479, 271));
        assert_eq!(w.cursor(), (0, 0));
        assert_eq!(w.width(), 480);
        assert_eq!(w.height(), 272);
    }

    #[test]
    fn test_clamps_to_area() {
        let w = Window::clamped(10, 20, 600, 300, 480, 272);
        assert_eq!((w.xs, w.ys, w.xe, w.ye), (10, 20, 479, 271));
        assert_eq!(w.cursor(), (10, 20));
    }

    #[test]
    fn test_reversed_bounds() {
        let w = Window::clamped(19, 19, 10, 10, 480, 272);
        assert_eq!((w.xs, w.ys, w.xe, w.ye), (10, 10, 19, 19));
        assert_eq!(w.width(), 10);
    }
}
