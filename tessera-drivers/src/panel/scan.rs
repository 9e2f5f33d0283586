//! Scan-step adjustment for rotated copies
//!
//! A rotated blit writes physical rows, which are not logical rows. Instead
//! of reordering pixels, the source cursor is re-aimed: its per-pixel step
//! and per-row step are reflected and swapped the same way the destination
//! geometry is, so the converter still reads the right source pixel for
//! every physical slot.
//!
//! Both functions work on the engine's local [`ScanCursor`] and return the
//! per-row step `(next_x, next_y)`.

use core::mem::swap;

use tessera_core::pixel::{ScanCursor, FP_ONE};
use tessera_core::transform::Rotation;

/// Steps for writing a `w` x `h` logical source rectangle
///
/// The cursor start moves to the source pixel that lands in the physical
/// top-left corner.
pub(crate) fn write_steps(r: Rotation, w: u16, h: u16, cursor: &mut ScanCursor) -> (u32, u32) {
    let mut next_x = 0u32;
    let mut next_y = FP_ONE;
    let mut add_x = cursor.x32_add;
    let mut add_y = cursor.y32_add;

    if r.flips_y() {
        let rows = u32::from(h.saturating_sub(1));
        cursor.y32 = cursor.y32.wrapping_add(next_y.wrapping_mul(rows));
        next_y = next_y.wrapping_neg();
    }
    if r.flips_x() {
        let cols = u32::from(w.saturating_sub(1));
        cursor.x32 = cursor.x32.wrapping_add(add_x.wrapping_mul(cols));
        cursor.y32 = cursor.y32.wrapping_add(add_y.wrapping_mul(cols));
        add_x = add_x.wrapping_neg();
        add_y = add_y.wrapping_neg();
    }
    if r.swaps_axes() {
        swap(&mut next_x, &mut add_x);
        swap(&mut next_y, &mut add_y);
    }

    cursor.x32_add = add_x;
    cursor.y32_add = add_y;
    (next_x, next_y)
}

/// Steps for reading the frame buffer back in logical order
///
/// The caller positions the cursor on the physical image of the logical
/// start point.
pub(crate) fn read_steps(r: Rotation, cursor: &mut ScanCursor) -> (u32, u32) {
    let mut next_x = 0u32;
    let mut next_y = FP_ONE;
    let mut add_x = cursor.x32_add;
    let mut add_y = cursor.y32_add;

    if r.flips_y() {
        next_y = next_y.wrapping_neg();
    }
    if r.flips_x() {
        add_x = add_x.wrapping_neg();
    }
    if (r.code() + 1) & 2 != 0 {
        add_y = add_y.wrapping_neg();
    }
    if r.swaps_axes() {
        swap(&mut add_x, &mut add_y);
        swap(&mut next_x, &mut next_y);
    }

    cursor.x32_add = add_x;
    cursor.y32_add = add_y;
    (next_x, next_y)
}
