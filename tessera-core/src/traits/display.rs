//! Display controller trait
//!
//! The display controller scans the frame buffer out to the glass. Clock
//! setup, pin muxing and register programming all live behind this trait;
//! the raster engine only tells it what to show and when.

use crate::config::{LayerConfig, PanelTiming};
use crate::transform::Rect;

/// Errors reported by a display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Timing parameters rejected by the controller
    Timing,
    /// Controller is busy and cannot be reconfigured
    Busy,
    /// Communication with the controller failed
    Communication,
}

/// Trait for the controller that presents the frame buffer
pub trait DisplayController {
    /// Program the controller for the panel timing and layer geometry
    fn configure(&mut self, timing: &PanelTiming, layer: &LayerConfig) -> Result<(), DisplayError>;

    /// Present a region of the frame buffer
    ///
    /// The region is in physical frame-buffer coordinates. Controllers that
    /// scan the buffer continuously may ignore it.
    fn present(&mut self, region: Rect);

    /// Check if a previous present is still in flight
    fn is_busy(&self) -> bool {
        false
    }
}
