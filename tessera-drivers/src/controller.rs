//! Null display controller
//!
//! LCD-TFT controllers fetch the frame buffer continuously, so there is
//! nothing to do when a region changes. This controller accepts any
//! configuration and ignores presents.

use tessera_core::config::{LayerConfig, PanelTiming};
use tessera_core::traits::{DisplayController, DisplayError};
use tessera_core::transform::Rect;

/// Controller for buffers that are scanned out without being told
#[derive(Debug, Clone, Copy, Default)]
pub struct NullController {
    layer: Option<LayerConfig>,
}

impl NullController {
    /// Create an unconfigured controller
    pub const fn new() -> Self {
        Self { layer: None }
    }

    /// Layer geometry from the last successful `configure`
    pub fn layer(&self) -> Option<&LayerConfig> {
        self.layer.as_ref()
    }
}

impl DisplayController for NullController {
    fn configure(&mut self, _timing: &PanelTiming, layer: &LayerConfig) -> Result<(), DisplayError> {
        self.layer = Some(*layer);
        Ok(())
    }

    fn present(&mut self, _region: Rect) {}
}
