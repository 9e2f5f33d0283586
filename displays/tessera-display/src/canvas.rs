//! Panel-backed draw target

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use tessera_core::pixel::{PixelCopy, SrcImage, NATIVE_BYTES, NATIVE_DEPTH};
use tessera_core::traits::Panel;
use tessera_drivers::convert::Rgb565Copy;

/// Pixels staged per `write_pixels` call in `fill_contiguous`
const CHUNK_PIXELS: usize = 32;
const CHUNK_BYTES: usize = CHUNK_PIXELS * NATIVE_BYTES;

/// embedded-graphics draw target over a [`Panel`]
///
/// The canvas size follows the panel's logical size, so it changes when
/// the panel is rotated.
pub struct Canvas<P> {
    panel: P,
}

impl<P: Panel> Canvas<P> {
    /// Wrap a panel
    pub fn new(panel: P) -> Self {
        Self { panel }
    }

    /// Get access to the panel
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Get mutable access to the panel
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Unwrap the panel
    pub fn into_inner(self) -> P {
        self.panel
    }

    /// Clip an area to the panel, returning `(x, y, w, h)`
    fn clip(&self, area: &Rectangle) -> Option<(u16, u16, u16, u16)> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return None;
        }
        Some((
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
        ))
    }

    /// Send staged pixels through the panel cursor
    fn flush(&mut self, chunk: &mut Vec<u8, CHUNK_BYTES>) {
        let len = chunk.len() / NATIVE_BYTES;
        if len == 0 {
            return;
        }
        let src = SrcImage::new(chunk, len as u32, NATIVE_DEPTH.bits());
        let mut param = PixelCopy::new(src, &Rgb565Copy).with_no_convert(true);
        self.panel.write_pixels(&mut param, len as u32);
        chunk.clear();
    }
}

fn raw(color: Rgb565) -> u32 {
    u32::from(color.into_storage())
}

impl<P: Panel> OriginDimensions for Canvas<P> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.panel.width()), u32::from(self.panel.height()))
    }
}

impl<P: Panel> DrawTarget for Canvas<P> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let w = i32::from(self.panel.width());
        let h = i32::from(self.panel.height());

        self.panel.start_write();
        for Pixel(p, c) in pixels {
            if p.x < 0 || p.y < 0 || p.x >= w || p.y >= h {
                continue;
            }
            self.panel.draw_pixel_preclipped(p.x as u16, p.y as u16, raw(c));
        }
        self.panel.end_write();
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let Some((x, y, w, h)) = self.clip(area) else {
            return Ok(());
        };
        // Partly visible areas go pixel by pixel
        if area.size != Size::new(u32::from(w), u32::from(h)) {
            let pixels = area.points().zip(colors).map(|(p, c)| Pixel(p, c));
            return self.draw_iter(pixels);
        }

        self.panel.start_write();
        self.panel.set_window(x, y, x + w - 1, y + h - 1);

        let mut chunk: Vec<u8, CHUNK_BYTES> = Vec::new();
        let total = usize::from(w) * usize::from(h);
        for c in colors.into_iter().take(total) {
            if chunk.is_full() {
                self.flush(&mut chunk);
            }
            let _ = chunk.extend_from_slice(&c.into_storage().to_le_bytes());
        }
        self.flush(&mut chunk);

        self.panel.end_write();
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Some((x, y, w, h)) = self.clip(area) else {
            return Ok(());
        };
        self.panel.start_write();
        self.panel.fill_rect_preclipped(x, y, w, h, raw(color));
        self.panel.end_write();
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let all = self.bounding_box();
        self.fill_solid(&all, color)
    }
}
