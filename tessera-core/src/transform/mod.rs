//! Coordinate transform between logical and physical frame-buffer space

pub mod rect;
pub mod rotation;

pub use rect::Rect;
pub use rotation::{Orientation, Rotation};
