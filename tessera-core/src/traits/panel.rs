//! Panel trait
//!
//! The drawing contract a graphics layer drives. A panel owns a window
//! (clip rectangle plus write cursor) and an orientation; every coordinate
//! passed in is logical, i.e. already rotated from the caller's point of
//! view.
//!
//! Methods with the `_preclipped` suffix do not validate coordinates. The
//! caller has already clipped them to the logical panel area, and values
//! outside it produce unspecified results.
//!
//! A panel has exactly one writer at a time. All mutating methods take
//! `&mut self`, and nothing here locks.

use super::display::DisplayError;
use crate::pixel::{ColorDepth, PixelCopy};

/// Panel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// No frame buffer has been assigned
    NotReady,
    /// Frame buffer is smaller than the panel needs
    BufferTooSmall,
    /// Display controller rejected the configuration
    Controller(DisplayError),
}

impl From<DisplayError> for PanelError {
    fn from(e: DisplayError) -> Self {
        PanelError::Controller(e)
    }
}

/// Panel drawing contract
pub trait Panel {
    /// Bring the panel up
    ///
    /// Fails if the panel has nothing to draw into. Drawing before a
    /// successful init has no effect.
    fn init(&mut self) -> Result<(), PanelError>;

    /// Request a colour depth, returning the depth actually in use
    fn set_color_depth(&mut self, depth: ColorDepth) -> ColorDepth;

    /// Select a rotation (0-7, bit 2 = mirror)
    fn set_rotation(&mut self, rotation: u8);

    /// Current caller-facing rotation
    fn rotation(&self) -> u8;

    /// Logical width for the current rotation
    fn width(&self) -> u16;

    /// Logical height for the current rotation
    fn height(&self) -> u16;

    /// Set the window (inclusive bounds) and move the cursor to its origin
    fn set_window(&mut self, xs: u16, ys: u16, xe: u16, ye: u16);

    /// Current cursor position inside the window
    fn cursor(&self) -> (u16, u16);

    /// Write `len` pixels of one raw colour at the cursor
    ///
    /// The run wraps at the right edge of the window and at its bottom
    /// edge back to the top row.
    fn write_block(&mut self, raw: u32, len: u32);

    /// Write `len` converted pixels at the cursor, wrapping like
    /// [`write_block`](Panel::write_block)
    ///
    /// `param.cursor` is advanced past the consumed source pixels.
    fn write_pixels(&mut self, param: &mut PixelCopy<'_>, len: u32);

    /// Store one pixel
    fn draw_pixel_preclipped(&mut self, x: u16, y: u16, raw: u32);

    /// Fill a rectangle with one raw colour
    fn fill_rect_preclipped(&mut self, x: u16, y: u16, w: u16, h: u16, raw: u32);

    /// Copy a source image into a rectangle
    fn write_image(&mut self, x: u16, y: u16, w: u16, h: u16, param: &PixelCopy<'_>);

    /// Read a rectangle into `dst`, converting through `param`
    fn read_rect(&self, x: u16, y: u16, w: u16, h: u16, dst: &mut [u8], param: &PixelCopy<'_>);

    /// Open a (possibly nested) write transaction
    fn start_write(&mut self);

    /// Close a write transaction, presenting pending changes when the
    /// outermost one ends
    fn end_write(&mut self);

    /// Number of open write transactions
    fn transaction_depth(&self) -> u32;

    /// Present everything drawn since the last present
    fn display(&mut self);
}
