//! Pixel-copy descriptor
//!
//! The graphics layer describes a source image and hands over a
//! [`PixelConverter`] that knows how to turn source pixels into destination
//! pixels. The raster engine never inspects the source format itself; it
//! only decides *where* pixels go and drives the converter's `copy` and
//! `skip` callbacks.
//!
//! The source is walked with a Q16.16 fixed-point cursor. Each destination
//! pixel advances the cursor by `(x32_add, y32_add)`, which lets the engine
//! scan a source diagonally, backwards or column-wise when the panel is
//! rotated.
//!
//! The engine works on a [`Scan`], a stack-local copy of the descriptor's
//! scan state. Rotation adjustments are applied to that copy only, so a
//! caller's [`PixelCopy`] is never left with rotated steps.

/// Fractional bits of the scan cursor
pub const FP_SCALE: u32 = 16;

/// One whole source pixel in cursor units
pub const FP_ONE: u32 = 1 << FP_SCALE;

/// Source image borrowed for the duration of a copy
#[derive(Debug, Clone, Copy)]
pub struct SrcImage<'a> {
    /// Raw pixel bytes, row-major
    pub data: &'a [u8],
    /// Row stride in pixels
    pub bitwidth: u32,
    /// Bits per source pixel
    pub bits: u8,
}

impl<'a> SrcImage<'a> {
    /// Describe a row-major image
    pub const fn new(data: &'a [u8], bitwidth: u32, bits: u8) -> Self {
        Self {
            data,
            bitwidth,
            bits,
        }
    }

    /// Bytes per source pixel
    pub const fn bytes_per_pixel(&self) -> usize {
        (self.bits >> 3) as usize
    }

    /// Raw bytes of the pixel at `(x, y)`, if it lies inside `data`
    pub fn pixel(&self, x: u32, y: u32) -> Option<&'a [u8]> {
        if x >= self.bitwidth {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        let start = (y as usize * self.bitwidth as usize + x as usize) * bpp;
        self.data.get(start..start + bpp)
    }
}

/// Fixed-point position and per-pixel step through a source image
///
/// Steps are stored as two's-complement `u32` and applied with wrapping
/// arithmetic, so a negated step walks backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanCursor {
    /// Source x in Q16.16
    pub x32: u32,
    /// Source y in Q16.16
    pub y32: u32,
    /// x advance per destination pixel
    pub x32_add: u32,
    /// y advance per destination pixel
    pub y32_add: u32,
}

impl ScanCursor {
    /// Cursor at a whole-pixel position stepping one pixel right
    pub const fn at(x: u32, y: u32) -> Self {
        Self {
            x32: x << FP_SCALE,
            y32: y << FP_SCALE,
            x32_add: FP_ONE,
            y32_add: 0,
        }
    }

    /// Whole-pixel x position
    pub const fn x(&self) -> u32 {
        self.x32 >> FP_SCALE
    }

    /// Whole-pixel y position
    pub const fn y(&self) -> u32 {
        self.y32 >> FP_SCALE
    }

    /// Step to the next source pixel
    #[inline]
    pub fn advance(&mut self) {
        self.x32 = self.x32.wrapping_add(self.x32_add);
        self.y32 = self.y32.wrapping_add(self.y32_add);
    }
}

/// How the converter treats a particular source value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transparency {
    /// Every source pixel is copied
    #[default]
    Opaque,
    /// Source pixels equal to this raw value are left untouched
    Key(u32),
}

impl Transparency {
    /// Check if the descriptor has no transparent pixels
    pub const fn is_opaque(self) -> bool {
        matches!(self, Self::Opaque)
    }
}

/// Working scan state handed to converter callbacks
#[derive(Debug, Clone, Copy)]
pub struct Scan<'a> {
    /// Source image
    pub src: SrcImage<'a>,
    /// Current position and step
    pub cursor: ScanCursor,
    /// Transparency mode
    pub transparency: Transparency,
}

/// Pixel conversion callbacks
///
/// Destination indices are in units of the converter's destination pixel
/// size, counted from the start of `dst`.
pub trait PixelConverter {
    /// Copy pixels into slots `index..end`, advancing the cursor per pixel
    ///
    /// Returns the index actually reached. A converter stops early on a
    /// transparent source pixel, leaving the cursor on it.
    fn copy(&self, dst: &mut [u8], index: usize, end: usize, scan: &mut Scan<'_>) -> usize;

    /// Pass over transparent pixels in `index..end`
    ///
    /// Returns the index of the first opaque pixel, or `end`.
    fn skip(&self, index: usize, end: usize, scan: &mut Scan<'_>) -> usize;
}

/// Descriptor for moving pixels between a caller buffer and a panel
#[derive(Clone, Copy)]
pub struct PixelCopy<'a> {
    /// Source image (ignored by reads, which scan the frame buffer)
    pub src: SrcImage<'a>,
    /// Source position and per-pixel step
    pub cursor: ScanCursor,
    /// Transparency mode
    pub transparency: Transparency,
    /// Source is already in the frame-buffer native format
    pub no_convert: bool,
    /// Conversion callbacks
    pub converter: &'a dyn PixelConverter,
}

impl<'a> PixelCopy<'a> {
    /// Opaque descriptor reading `src` from `(0, 0)`
    pub fn new(src: SrcImage<'a>, converter: &'a dyn PixelConverter) -> Self {
        Self {
            src,
            cursor: ScanCursor::at(0, 0),
            transparency: Transparency::Opaque,
            no_convert: false,
            converter,
        }
    }

    /// Start the scan at a different source pixel
    pub fn with_origin(mut self, x: u32, y: u32) -> Self {
        self.cursor.x32 = x << FP_SCALE;
        self.cursor.y32 = y << FP_SCALE;
        self
    }

    /// Mark the source as native format
    pub fn with_no_convert(mut self, no_convert: bool) -> Self {
        self.no_convert = no_convert;
        self
    }

    /// Set the transparency mode
    pub fn with_transparency(mut self, transparency: Transparency) -> Self {
        self.transparency = transparency;
        self
    }

    /// Local working copy of the scan state
    pub fn scan(&self) -> Scan<'a> {
        Scan {
            src: self.src,
            cursor: self.cursor,
            transparency: self.transparency,
        }
    }
}

impl core::fmt::Debug for PixelCopy<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelCopy")
            .field("src", &self.src)
            .field("cursor", &self.cursor)
            .field("transparency", &self.transparency)
            .field("no_convert", &self.no_convert)
            .finish_non_exhaustive()
    }
}
