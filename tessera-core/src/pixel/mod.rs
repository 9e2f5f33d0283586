//! Pixel formats, the pattern fill primitive and the pixel-copy contract

pub mod color;
pub mod copy;
pub mod fill;

pub use color::{ColorDepth, NATIVE_BYTES, NATIVE_DEPTH};
pub use copy::{
    PixelConverter, PixelCopy, Scan, ScanCursor, SrcImage, Transparency, FP_ONE, FP_SCALE,
};
pub use fill::fill_pattern;
