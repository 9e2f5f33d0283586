//! Native RGB565 copy

use tessera_core::pixel::{PixelConverter, Scan};

use super::{copy_run, skip_run};

fn raw(px: [u8; 2]) -> u32 {
    u16::from_le_bytes(px) as u32
}

/// Copies little-endian RGB565 pixels unchanged
///
/// Honours [`Transparency::Key`](tessera_core::pixel::Transparency::Key)
/// against the 16-bit source value. Works in both directions: as a write
/// converter from an RGB565 image and as a read converter out of the frame
/// buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rgb565Copy;

impl PixelConverter for Rgb565Copy {
    fn copy(&self, dst: &mut [u8], index: usize, end: usize, scan: &mut Scan<'_>) -> usize {
        copy_run::<2, 2>(dst, index, end, scan, raw, |px| px)
    }

    fn skip(&self, index: usize, end: usize, scan: &mut Scan<'_>) -> usize {
        skip_run(index, end, scan, raw)
    }
}
