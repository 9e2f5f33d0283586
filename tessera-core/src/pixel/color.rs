//! Colour depth selection

/// Pixel formats a graphics layer may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorDepth {
    /// 8-bit grayscale
    Grayscale8,
    /// 3-3-2 packed colour
    Rgb332,
    /// 5-6-5 packed colour (the frame-buffer native format)
    #[default]
    Rgb565,
    /// 6-6-6 colour in three bytes
    Rgb666,
    /// 8-8-8 colour in three bytes
    Rgb888,
    /// 8-8-8-8 colour with alpha
    Argb8888,
}

impl ColorDepth {
    /// Bits per pixel
    pub const fn bits(self) -> u8 {
        match self {
            Self::Grayscale8 | Self::Rgb332 => 8,
            Self::Rgb565 => 16,
            Self::Rgb666 | Self::Rgb888 => 24,
            Self::Argb8888 => 32,
        }
    }

    /// Bytes per pixel
    pub const fn bytes(self) -> usize {
        (self.bits() >> 3) as usize
    }
}

/// Format of every pixel stored in the frame buffer
pub const NATIVE_DEPTH: ColorDepth = ColorDepth::Rgb565;

/// Bytes per native pixel
pub const NATIVE_BYTES: usize = NATIVE_DEPTH.bytes();
