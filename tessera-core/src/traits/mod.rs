//! Panel and display controller traits
//!
//! These traits define the seam between the graphics layer, the raster
//! engine and the display controller hardware.

pub mod display;
pub mod panel;

pub use display::{DisplayController, DisplayError};
pub use panel::{Panel, PanelError};
