//! RGB888 conversions
//!
//! 24-bit pixels are stored as three bytes in R, G, B order. Transparent
//! keys for 24-bit sources are given as `0xRRGGBB`.

use tessera_core::pixel::{PixelConverter, Scan};

use super::{copy_run, rgb565, rgb888, skip_run};

fn raw888(px: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, px[0], px[1], px[2]])
}

fn raw565(px: [u8; 2]) -> u32 {
    u16::from_le_bytes(px) as u32
}

/// Writes an RGB888 source into an RGB565 frame buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct Rgb888ToRgb565;

impl PixelConverter for Rgb888ToRgb565 {
    fn copy(&self, dst: &mut [u8], index: usize, end: usize, scan: &mut Scan<'_>) -> usize {
        copy_run::<3, 2>(dst, index, end, scan, raw888, |[r, g, b]| {
            rgb565(r, g, b).to_le_bytes()
        })
    }

    fn skip(&self, index: usize, end: usize, scan: &mut Scan<'_>) -> usize {
        skip_run(index, end, scan, raw888)
    }
}

/// Reads an RGB565 frame buffer out as RGB888
#[derive(Debug, Clone, Copy, Default)]
pub struct Rgb565ToRgb888;

impl PixelConverter for Rgb565ToRgb888 {
    fn copy(&self, dst: &mut [u8], index: usize, end: usize, scan: &mut Scan<'_>) -> usize {
        copy_run::<2, 3>(dst, index, end, scan, raw565, |px| {
            let (r, g, b) = rgb888(u16::from_le_bytes(px));
            [r, g, b]
        })
    }

    fn skip(&self, index: usize, end: usize, scan: &mut Scan<'_>) -> usize {
        skip_run(index, end, scan, raw565)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::pixel::{ScanCursor, SrcImage, Transparency};

    #[test]
    fn test_888_to_565() {
        let src = [0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x12, 0x34, 0x56];
        let mut scan = Scan {
            src: SrcImage::new(&src, 3, 24),
            cursor: ScanCursor::at(0, 0),
            transparency: Transparency::Key(0x00FF00),
        };
        let mut dst = [0u8; 6];

        assert_eq!(Rgb888ToRgb565.copy(&mut dst, 0, 3, &mut scan), 1);
        assert_eq!(Rgb888ToRgb565.skip(1, 3, &mut scan), 2);
        assert_eq!(Rgb888ToRgb565.copy(&mut dst, 2, 3, &mut scan), 3);

        assert_eq!(&dst[..2], &0xF800u16.to_le_bytes());
        assert_eq!(&dst[2..4], &[0, 0]);
        assert_eq!(&dst[4..], &rgb565(0x12, 0x34, 0x56).to_le_bytes());
    }

    #[test]
    fn test_565_to_888_walks_column() {
        // 2x2 source, scanned downwards
        let src = [0x00, 0xF8, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00];
        let mut cursor = ScanCursor::at(0, 0);
        cursor.x32_add = 0;
        cursor.y32_add = tessera_core::pixel::FP_ONE;
        let mut scan = Scan {
            src: SrcImage::new(&src, 2, 16),
            cursor,
            transparency: Transparency::Opaque,
        };
        let mut dst = [0u8; 6];

        assert_eq!(Rgb565ToRgb888.copy(&mut dst, 0, 2, &mut scan), 2);
        assert_eq!(dst, [0xFF, 0, 0, 0, 0, 0xFF]);
    }
}
