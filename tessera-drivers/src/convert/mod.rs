//! Reference pixel converters
//!
//! Implementations of [`PixelConverter`](tessera_core::pixel::PixelConverter)
//! for the formats a frame-buffer panel commonly meets. Each converter walks
//! the source with the scan cursor and stops at the current index when the
//! cursor leaves the source image.

pub mod rgb565;
pub mod rgb888;

pub use rgb565::Rgb565Copy;
pub use rgb888::{Rgb565ToRgb888, Rgb888ToRgb565};

use tessera_core::pixel::{Scan, Transparency};

/// Source pixel under the cursor, if it is inside the image and `S` bytes wide
fn sample<const S: usize>(scan: &Scan<'_>) -> Option<[u8; S]> {
    let px = scan.src.pixel(scan.cursor.x(), scan.cursor.y())?;
    px.try_into().ok()
}

/// Check a source pixel against the transparent key
fn is_keyed(scan: &Scan<'_>, raw: u32) -> bool {
    matches!(scan.transparency, Transparency::Key(key) if key == raw)
}

/// Shared `copy` loop
///
/// `raw` gives the value compared against the transparent key and `out`
/// produces the `D` destination bytes.
fn copy_run<const S: usize, const D: usize>(
    dst: &mut [u8],
    index: usize,
    end: usize,
    scan: &mut Scan<'_>,
    raw: fn([u8; S]) -> u32,
    out: fn([u8; S]) -> [u8; D],
) -> usize {
    let mut i = index;
    while i < end {
        let Some(px) = sample::<S>(scan) else { break };
        if is_keyed(scan, raw(px)) {
            break;
        }
        let Some(slot) = dst.get_mut(i * D..(i + 1) * D) else {
            break;
        };
        slot.copy_from_slice(&out(px));
        scan.cursor.advance();
        i += 1;
    }
    i
}

/// Shared `skip` loop
fn skip_run<const S: usize>(
    index: usize,
    end: usize,
    scan: &mut Scan<'_>,
    raw: fn([u8; S]) -> u32,
) -> usize {
    if scan.transparency.is_opaque() {
        return index;
    }
    let mut i = index;
    while i < end {
        match sample::<S>(scan) {
            Some(px) if is_keyed(scan, raw(px)) => {}
            _ => break,
        }
        scan.cursor.advance();
        i += 1;
    }
    i
}

/// Pack 8-bit channels into an RGB565 value
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Expand an RGB565 value to 8-bit channels
///
/// The high bits are replicated into the low bits so full scale maps to
/// 0xFF.
pub const fn rgb888(c: u16) -> (u8, u8, u8) {
    let r = ((c >> 11) & 0x1F) as u8;
    let g = ((c >> 5) & 0x3F) as u8;
    let b = (c & 0x1F) as u8;
    ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}
