//! Panel configuration types
//!
//! These types describe the attached panel. They are parsed from TOML at
//! bring-up or restored from postcard-serialized binary data.

use heapless::String;

use crate::pixel::ColorDepth;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Sync, porch and active counts for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingInfo {
    /// Sync pulse width
    pub sync: u16,
    /// Back porch
    pub back_porch: u16,
    /// Active pixels (or lines)
    pub active: u16,
    /// Front porch
    pub front_porch: u16,
}

impl TimingInfo {
    /// Create timing for one axis
    pub const fn new(sync: u16, back_porch: u16, active: u16, front_porch: u16) -> Self {
        Self {
            sync,
            back_porch,
            active,
            front_porch,
        }
    }

    /// Total clocks (or lines) per period
    pub const fn total(&self) -> u32 {
        self.sync as u32 + self.back_porch as u32 + self.active as u32 + self.front_porch as u32
    }
}

/// Horizontal and vertical panel timing
///
/// Only the active counts matter to the raster engine. The rest is passed
/// through to the display controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelTiming {
    /// Horizontal timing
    pub h: TimingInfo,
    /// Vertical timing
    pub v: TimingInfo,
}

impl PanelTiming {
    /// 480x272 RK043FN48H panel on the STM32F746G-DISCO board
    pub const STM32F746G_DISCO: Self = Self {
        h: TimingInfo::new(41, 13, 480, 32),
        v: TimingInfo::new(10, 10, 272, 2),
    };

    /// Physical panel width
    pub const fn width(&self) -> u16 {
        self.h.active
    }

    /// Physical panel height
    pub const fn height(&self) -> u16 {
        self.v.active
    }

    /// Frame-buffer size in bytes for a given depth
    pub const fn frame_bytes(&self, depth: ColorDepth) -> usize {
        self.h.active as usize * self.v.active as usize * depth.bytes()
    }
}

/// Panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Display label
    pub label: String<MAX_LABEL_LEN>,
    /// Panel timing
    pub timing: PanelTiming,
    /// Mounting offset combined with every requested rotation (0-7)
    pub offset_rotation: u8,
    /// Rotation applied at init (0-7)
    pub rotation: u8,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            timing: PanelTiming::STM32F746G_DISCO,
            offset_rotation: 0,
            rotation: 0,
        }
    }
}

impl PanelConfig {
    /// Create a config for the given timing
    pub fn new(timing: PanelTiming) -> Self {
        Self {
            timing,
            ..Default::default()
        }
    }
}

/// Layer geometry handed to the display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerConfig {
    /// Layer width in pixels
    pub width: u16,
    /// Layer height in pixels
    pub height: u16,
    /// Pixel format of the frame buffer
    pub depth: ColorDepth,
    /// Frame-buffer start address
    pub fb_addr: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disco_timing() {
        let t = PanelTiming::STM32F746G_DISCO;
        assert_eq!(t.width(), 480);
        assert_eq!(t.height(), 272);
        assert_eq!(t.h.total(), 41 + 13 + 480 + 32);
        assert_eq!(t.v.total(), 10 + 10 + 272 + 2);
    }

    #[test]
    fn test_frame_bytes() {
        let t = PanelTiming::STM32F746G_DISCO;
        assert_eq!(t.frame_bytes(ColorDepth::Rgb565), 480 * 272 * 2);
    }

    #[test]
    fn test_default_config() {
        let config = PanelConfig::default();
        assert_eq!(config.timing, PanelTiming::STM32F746G_DISCO);
        assert_eq!(config.offset_rotation, 0);
        assert!(config.label.is_empty());
    }
}
