//! embedded-graphics adapter for Tessera panels
//!
//! This crate provides [`Canvas`], which exposes any
//! [`Panel`](tessera_core::traits::Panel) as an embedded-graphics
//! `DrawTarget`. Shapes, text and images drawn with embedded-graphics are
//! clipped to the logical panel area and handed to the panel's preclipped
//! operations.
//!
//! # Architecture
//!
//! embedded-graphics decides *what* to draw. The panel decides *where* each
//! pixel lands for the current rotation. The canvas only clips, converts
//! colours to raw RGB565 and brackets multi-pixel draws in a write
//! transaction so the panel presents them once.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;

pub use canvas::Canvas;
