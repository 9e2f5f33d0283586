//! Frame-buffer raster engine
//!
//! Draws into a linear RGB565 buffer, one little-endian `u16` per pixel,
//! rows of `panel_width` pixels with no padding. The buffer is scanned out
//! by a display controller, so drawing is plain memory access and
//! presenting is a hint to the controller.
//!
//! Rotation 0 with native-format sources takes row-wise `memcpy`/`fill`
//! paths. Everything else goes through the pixel-copy converter, with the
//! scan steps re-aimed for the current orientation.

use tessera_core::config::{LayerConfig, PanelConfig, PanelTiming};
use tessera_core::pixel::{
    fill_pattern, ColorDepth, PixelConverter, PixelCopy, Scan, SrcImage, FP_SCALE, NATIVE_BYTES,
    NATIVE_DEPTH,
};
use tessera_core::traits::{DisplayController, Panel, PanelError};
use tessera_core::transform::{Orientation, Rect};

use super::scan::{read_steps, write_steps};
use super::window::Window;

/// Raster engine over a borrowed frame buffer
///
/// A buffer handed over with [`set_frame_buffer`](Self::set_frame_buffer)
/// is only drawn into after [`init`](Panel::init) has accepted it. Until
/// then every drawing call is a no-op.
///
/// Drawing calls accumulate the touched physical region. It is presented
/// when the outermost write transaction ends or on [`display`](Panel::display).
/// A single pixel drawn outside any transaction is presented immediately.
pub struct FrameBufferPanel<'fb, D> {
    controller: D,
    /// Assigned but not yet accepted by `init`
    pending: Option<&'fb mut [u8]>,
    /// Live buffer
    fb: Option<&'fb mut [u8]>,
    config: PanelConfig,
    orientation: Orientation,
    window: Window,
    depth: u32,
    dirty: Rect,
}

impl<'fb, D: DisplayController> FrameBufferPanel<'fb, D> {
    /// Create a panel with no frame buffer
    pub fn new(controller: D, config: PanelConfig) -> Self {
        let mut orientation = Orientation::new(
            config.timing.width(),
            config.timing.height(),
            config.offset_rotation,
        );
        orientation.set_rotation(config.rotation);
        Self {
            controller,
            pending: None,
            fb: None,
            window: Window::full(orientation.width(), orientation.height()),
            orientation,
            config,
            depth: 0,
            dirty: Rect::default(),
        }
    }

    /// Hand over the frame buffer
    ///
    /// Takes effect at the next [`init`](Panel::init). The buffer must hold
    /// `panel_width * panel_height` native pixels.
    pub fn set_frame_buffer(&mut self, fb: &'fb mut [u8]) {
        debug_assert_eq!(self.depth, 0, "frame buffer swapped inside a write transaction");
        self.fb = None;
        self.pending = Some(fb);
    }

    /// Replace the panel timing
    ///
    /// The physical size changes with it, so the panel must be initialised
    /// again before drawing resumes.
    pub fn set_panel_timing(&mut self, timing: PanelTiming) {
        debug_assert_eq!(self.depth, 0, "timing changed inside a write transaction");
        self.config.timing = timing;
        if let Some(fb) = self.fb.take() {
            self.pending = Some(fb);
        }
        let rotation = self.orientation.rotation();
        self.orientation = Orientation::new(timing.width(), timing.height(), self.config.offset_rotation);
        self.orientation.set_rotation(rotation);
        self.reset_window();
    }

    /// Physical width (the frame-buffer row length in pixels)
    pub fn panel_width(&self) -> u16 {
        self.config.timing.width()
    }

    /// Physical height
    pub fn panel_height(&self) -> u16 {
        self.config.timing.height()
    }

    /// Panel configuration
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Orientation state
    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// Active window and cursor
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Get access to the display controller
    pub fn controller(&self) -> &D {
        &self.controller
    }

    /// Get mutable access to the display controller
    pub fn controller_mut(&mut self) -> &mut D {
        &mut self.controller
    }

    /// Live frame buffer, once `init` has accepted it
    pub fn frame_buffer(&self) -> Option<&[u8]> {
        self.fb.as_deref()
    }

    /// Check if drawing calls reach the frame buffer
    pub fn is_ready(&self) -> bool {
        self.fb.is_some()
    }

    fn stride(&self) -> usize {
        usize::from(self.orientation.panel_width())
    }

    fn reset_window(&mut self) {
        self.window = Window::full(self.orientation.width(), self.orientation.height());
    }

    fn present_dirty(&mut self) {
        let region = core::mem::take(&mut self.dirty);
        if !region.is_empty() {
            self.controller.present(region);
        }
    }
}

impl<'fb, D: DisplayController> Panel for FrameBufferPanel<'fb, D> {
    fn init(&mut self) -> Result<(), PanelError> {
        debug_assert_eq!(self.depth, 0, "init inside a write transaction");

        let Some(fb) = self.pending.take().or_else(|| self.fb.take()) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("panel init without a frame buffer");
            return Err(PanelError::NotReady);
        };

        let timing = self.config.timing;
        let needed = timing.frame_bytes(NATIVE_DEPTH);
        if fb.len() < needed {
            #[cfg(feature = "defmt")]
            defmt::warn!("frame buffer too small: {} < {} bytes", fb.len(), needed);
            self.pending = Some(fb);
            return Err(PanelError::BufferTooSmall);
        }

        let layer = LayerConfig {
            width: timing.width(),
            height: timing.height(),
            depth: NATIVE_DEPTH,
            fb_addr: fb.as_ptr() as usize,
        };
        if let Err(e) = self.controller.configure(&timing, &layer) {
            #[cfg(feature = "defmt")]
            defmt::warn!("display controller rejected layer: {:?}", e);
            self.pending = Some(fb);
            return Err(e.into());
        }

        self.fb = Some(fb);
        self.dirty = Rect::default();
        self.set_rotation(self.config.rotation);

        #[cfg(feature = "defmt")]
        defmt::debug!("panel ready: {}x{}", layer.width, layer.height);

        Ok(())
    }

    fn set_color_depth(&mut self, _depth: ColorDepth) -> ColorDepth {
        NATIVE_DEPTH
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.orientation.set_rotation(rotation);
        self.reset_window();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "rotation {} (internal {}), {}x{}",
            self.orientation.rotation(),
            self.orientation.internal().code(),
            self.orientation.width(),
            self.orientation.height()
        );
    }

    fn rotation(&self) -> u8 {
        self.orientation.rotation()
    }

    fn width(&self) -> u16 {
        self.orientation.width()
    }

    fn height(&self) -> u16 {
        self.orientation.height()
    }

    fn set_window(&mut self, xs: u16, ys: u16, xe: u16, ye: u16) {
        self.window = Window::clamped(
            xs,
            ys,
            xe,
            ye,
            self.orientation.width(),
            self.orientation.height(),
        );
    }

    fn cursor(&self) -> (u16, u16) {
        self.window.cursor()
    }

    fn write_block(&mut self, raw: u32, len: u32) {
        let mut len = len;
        while len > 0 {
            let Window {
                xs,
                ys,
                xe,
                ye,
                xpos,
                ypos,
            } = self.window;

            let w = len.min(u32::from(xe) + 1 - u32::from(xpos));
            let mut h = 1;
            // Whole rows from the left edge go out as one rectangle
            if len >= w << 1 && xpos == xs {
                h = (len / w).min(u32::from(ye) + 1 - u32::from(ypos));
            }
            self.fill_rect_preclipped(xpos, ypos, w as u16, h as u16, raw);

            let x = u32::from(xpos) + w;
            if x <= u32::from(xe) {
                self.window.xpos = x as u16;
                return;
            }
            self.window.xpos = xs;
            let y = u32::from(ypos) + h;
            self.window.ypos = if y > u32::from(ye) { ys } else { y as u16 };
            len -= w * h;
        }
    }

    fn write_pixels(&mut self, param: &mut PixelCopy<'_>, len: u32) {
        if len == 0 {
            return;
        }
        let o = self.orientation;
        let stride = self.stride();
        let Some(fb) = self.fb.as_deref_mut() else {
            return;
        };

        let win = self.window;
        self.dirty
            .merge(&o.rect(Rect::new(win.xs, win.ys, win.width(), win.height())));

        let mut scan = param.scan();
        if o.internal().is_identity() {
            run_straight(fb, stride, &mut self.window, param.converter, &mut scan, len);
        } else {
            run_rotated(
                fb,
                stride,
                &o,
                &mut self.window,
                param.converter,
                &mut scan,
                param.no_convert,
                len,
            );
        }
        param.cursor = scan.cursor;
    }

    fn draw_pixel_preclipped(&mut self, x: u16, y: u16, raw: u32) {
        let (px, py) = self.orientation.point(x, y);
        let stride = self.stride();
        let Some(fb) = self.fb.as_deref_mut() else {
            return;
        };

        let offset = (usize::from(px) + usize::from(py) * stride) * NATIVE_BYTES;
        fb[offset..offset + NATIVE_BYTES].copy_from_slice(&(raw as u16).to_le_bytes());

        if self.depth == 0 {
            self.controller.present(Rect::point(px, py));
        } else {
            self.dirty.merge(&Rect::point(px, py));
        }
    }

    fn fill_rect_preclipped(&mut self, x: u16, y: u16, w: u16, h: u16, raw: u32) {
        if w == 0 || h == 0 {
            return;
        }
        let area = self.orientation.rect(Rect::new(x, y, w, h));
        let stride = self.stride();
        let Some(fb) = self.fb.as_deref_mut() else {
            return;
        };

        fill(fb, stride, area, raw);
        self.dirty.merge(&area);
    }

    fn write_image(&mut self, x: u16, y: u16, w: u16, h: u16, param: &PixelCopy<'_>) {
        if w == 0 || h == 0 {
            return;
        }
        let o = self.orientation;
        let r = o.internal();
        let area = o.rect(Rect::new(x, y, w, h));
        let stride = self.stride();
        let Some(fb) = self.fb.as_deref_mut() else {
            return;
        };
        self.dirty.merge(&area);

        if r.is_identity() && param.transparency.is_opaque() && param.no_convert {
            blit_rows(fb, stride, area, param);
            return;
        }

        let conv = param.converter;
        let mut scan = param.scan();
        let (next_x, next_y) = write_steps(r, w, h, &mut scan.cursor);
        let mut sx32 = scan.cursor.x32;
        let mut sy32 = scan.cursor.y32;

        let x = usize::from(area.x);
        let y = usize::from(area.y);
        for row in 0..usize::from(area.h) {
            let mut pos = x + (y + row) * stride;
            let end = pos + usize::from(area.w);
            loop {
                let copied = conv.copy(fb, pos, end, &mut scan);
                if copied == end {
                    break;
                }
                let skipped = conv.skip(copied, end, &mut scan);
                // A converter that moves neither way would spin forever
                if skipped == end || skipped == pos {
                    break;
                }
                pos = skipped;
            }
            sx32 = sx32.wrapping_add(next_x);
            sy32 = sy32.wrapping_add(next_y);
            scan.cursor.x32 = sx32;
            scan.cursor.y32 = sy32;
        }
    }

    fn read_rect(&self, x: u16, y: u16, w: u16, h: u16, dst: &mut [u8], param: &PixelCopy<'_>) {
        if w == 0 || h == 0 {
            return;
        }
        let Some(fb) = self.fb.as_deref() else {
            return;
        };
        let o = &self.orientation;
        let r = o.internal();
        let stride = self.stride();

        if r.is_identity() && param.no_convert {
            let len = usize::from(w) * NATIVE_BYTES;
            for row in 0..usize::from(h) {
                let src = (usize::from(x) + (usize::from(y) + row) * stride) * NATIVE_BYTES;
                let out = row * len;
                let (Some(from), Some(to)) = (fb.get(src..src + len), dst.get_mut(out..out + len))
                else {
                    break;
                };
                to.copy_from_slice(from);
            }
            return;
        }

        let mut scan = Scan {
            src: SrcImage::new(fb, stride as u32, NATIVE_DEPTH.bits()),
            cursor: param.cursor,
            transparency: param.transparency,
        };
        let (next_x, next_y) = read_steps(r, &mut scan.cursor);
        let (px, py) = o.point(x, y);
        let mut x32 = u32::from(px) << FP_SCALE;
        let mut y32 = u32::from(py) << FP_SCALE;

        let w = usize::from(w);
        let mut index = 0;
        for _ in 0..h {
            scan.cursor.x32 = x32;
            scan.cursor.y32 = y32;
            x32 = x32.wrapping_add(next_x);
            y32 = y32.wrapping_add(next_y);
            index = param.converter.copy(dst, index, index + w, &mut scan);
        }
    }

    fn start_write(&mut self) {
        self.depth += 1;
    }

    fn end_write(&mut self) {
        debug_assert!(self.depth > 0, "end_write without start_write");
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.present_dirty();
        }
    }

    fn transaction_depth(&self) -> u32 {
        self.depth
    }

    fn display(&mut self) {
        self.present_dirty();
    }
}

/// Fill a physical rectangle with one native pixel value
///
/// Rows are `stride` pixels apart with no padding, which is what lets a
/// full-width rectangle be filled as one run.
fn fill(fb: &mut [u8], stride: usize, area: Rect, raw: u32) {
    let mut w = usize::from(area.w);
    let mut h = usize::from(area.h);
    let start = (usize::from(area.x) + usize::from(area.y) * stride) * NATIVE_BYTES;
    let pitch = stride * NATIVE_BYTES;

    if w > 1 {
        if w == stride {
            w *= h;
            h = 1;
        }
        let len = w * NATIVE_BYTES;
        fill_pattern(&mut fb[start..start + len], raw, NATIVE_BYTES, w);
        for row in 1..h {
            fb.copy_within(start..start + len, start + row * pitch);
        }
    } else {
        let px = (raw as u16).to_le_bytes();
        for row in 0..h {
            let offset = start + row * pitch;
            fb[offset..offset + NATIVE_BYTES].copy_from_slice(&px);
        }
    }
}

/// Row-wise copy of a native-format source
fn blit_rows(fb: &mut [u8], stride: usize, area: Rect, param: &PixelCopy<'_>) {
    let src = &param.src;
    let src_pitch = src.bitwidth as usize * NATIVE_BYTES;
    let sx = param.cursor.x() as usize;
    let sy = param.cursor.y() as usize;
    let len = usize::from(area.w) * NATIVE_BYTES;

    for row in 0..usize::from(area.h) {
        let from = (sy + row) * src_pitch + sx * NATIVE_BYTES;
        let to = (usize::from(area.x) + (usize::from(area.y) + row) * stride) * NATIVE_BYTES;
        let (Some(from), Some(to)) = (src.data.get(from..from + len), fb.get_mut(to..to + len))
        else {
            break;
        };
        to.copy_from_slice(from);
    }
}

/// Cursor run at rotation 0: one converter call per row segment
fn run_straight(
    fb: &mut [u8],
    stride: usize,
    win: &mut Window,
    conv: &dyn PixelConverter,
    scan: &mut Scan<'_>,
    len: u32,
) {
    let xs = usize::from(win.xs);
    let xe = usize::from(win.xe);
    let ys = usize::from(win.ys);
    let ye = usize::from(win.ye);
    let mut x = usize::from(win.xpos);
    let mut y = usize::from(win.ypos);

    let mut remaining = len as usize;
    while remaining > 0 {
        let line = (xe + 1 - x).min(remaining);
        let row = y * stride;
        conv.copy(fb, row + x, row + x + line, scan);
        x += line;
        if x > xe {
            x = xs;
            y = if y != ye { y + 1 } else { ys };
        }
        remaining -= line;
    }

    win.xpos = x as u16;
    win.ypos = y as u16;
}

/// Cursor run under rotation: walk the reflected window one pixel at a time
#[allow(clippy::too_many_arguments)]
fn run_rotated(
    fb: &mut [u8],
    stride: usize,
    o: &Orientation,
    win: &mut Window,
    conv: &dyn PixelConverter,
    scan: &mut Scan<'_>,
    no_convert: bool,
    len: u32,
) {
    let r = o.internal();
    let (ax, ay) = o.steps();

    let (mut xs, mut xe, mut x) = (win.xs, win.xe, win.xpos);
    let (mut ys, mut ye, mut y) = (win.ys, win.ye, win.ypos);
    if r.flips_y() {
        ys = o.reflect_y(ys);
        ye = o.reflect_y(ye);
        y = o.reflect_y(y);
    }
    if r.flips_x() {
        xs = o.reflect_x(xs);
        xe = o.reflect_x(xe);
        x = o.reflect_x(x);
    }
    let (xs, xe, ys, ye) = (i32::from(xs), i32::from(xe), i32::from(ys), i32::from(ye));
    let (mut x, mut y) = (i32::from(x), i32::from(y));

    for _ in 0..len {
        let (px, py) = if r.swaps_axes() { (y, x) } else { (x, y) };
        let index = py as usize * stride + px as usize;

        if no_convert {
            let Some(src) = scan.src.pixel(scan.cursor.x(), scan.cursor.y()) else {
                break;
            };
            let offset = index * NATIVE_BYTES;
            if let Some(dst) = fb.get_mut(offset..offset + NATIVE_BYTES) {
                dst.iter_mut().zip(src).for_each(|(d, s)| *d = *s);
            }
            scan.cursor.advance();
        } else {
            conv.copy(fb, index, index + 1, scan);
        }

        if x != xe {
            x += ax;
        } else {
            x = xs;
            y = if y != ye { y + ay } else { ys };
        }
    }

    let (mut x, mut y) = (x as u16, y as u16);
    if r.flips_y() {
        y = o.reflect_y(y);
    }
    if r.flips_x() {
        x = o.reflect_x(x);
    }
    win.xpos = x;
    win.ypos = y;
}
