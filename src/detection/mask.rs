use image::{GrayImage, Luma, Rgb};

use crate::config::{MAX_HUE, SearchConfig};
use crate::models::HsvImage;

pub const MASK_ON: u8 = 255;
pub const MASK_OFF: u8 = 0;

/// Target hue with a symmetric tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueWindow {
    pub hue: i32,
    pub tolerance: i32,
}

impl HueWindow {
    pub fn new(hue: i32, tolerance: i32) -> Self {
        Self { hue, tolerance }
    }

    /// Inclusive hue bounds clamped to the 0..=180 scale.
    /// No wraparound: a window crossing 0 or 180 is cut at the edge.
    pub fn bounds(&self) -> (u8, u8) {
        let low = (self.hue - self.tolerance).clamp(0, MAX_HUE);
        let high = (self.hue + self.tolerance).clamp(0, MAX_HUE);
        (low as u8, high as u8)
    }
}

/// Inclusive per-channel HSV range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub fn from_window(window: HueWindow, config: &SearchConfig) -> Self {
        let (low_hue, high_hue) = window.bounds();
        Self {
            lower: [low_hue, config.min_saturation, config.min_value],
            upper: [high_hue, config.max_saturation, config.max_value],
        }
    }

    pub fn contains(&self, pixel: &Rgb<u8>) -> bool {
        pixel
            .0
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}

/// Build a binary mask of the pixels inside `range`.
/// An empty frame produces an empty mask.
pub fn make_color_mask(frame: &HsvImage, range: &HsvRange) -> GrayImage {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return GrayImage::new(width, height);
    }

    GrayImage::from_fn(width, height, |x, y| {
        if range.contains(frame.get_pixel(x, y)) {
            Luma([MASK_ON])
        } else {
            Luma([MASK_OFF])
        }
    })
}
