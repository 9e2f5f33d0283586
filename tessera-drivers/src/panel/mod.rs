//! Frame-buffer panel
//!
//! [`FrameBufferPanel`] implements the [`Panel`](tessera_core::traits::Panel)
//! contract on top of a linear RGB565 buffer. Every operation maps its
//! logical coordinates through the panel's
//! [`Orientation`](tessera_core::transform::Orientation) and touches the
//! buffer directly; the display controller is only asked to present the
//! affected physical region.

mod scan;
mod window;

pub mod framebuffer;

pub use framebuffer::FrameBufferPanel;
pub use window::Window;
