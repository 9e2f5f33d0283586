//! Board-agnostic core logic for Tessera frame-buffer panels
//!
//! This crate contains everything that does not depend on a particular
//! display controller or frame buffer location:
//!
//! - Rotation transform (logical to physical frame-buffer coordinates)
//! - Multi-byte pattern fill primitive
//! - Pixel-copy descriptor contract consumed by the raster engine
//! - Panel and display-controller traits
//! - Panel configuration types, TOML parsing and binary persistence

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod pixel;
pub mod traits;
pub mod transform;
