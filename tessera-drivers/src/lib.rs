//! Panel implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tessera-core:
//!
//! - Frame-buffer raster engine (linear RGB565 buffer scanned out by an
//!   LCD-TFT style controller)
//! - Reference pixel converters (RGB565 copy, RGB888 to and from RGB565)
//! - Null display controller for continuously scanned buffers

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod controller;
pub mod convert;
pub mod panel;

pub use controller::NullController;
pub use panel::FrameBufferPanel;
