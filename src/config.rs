use serde::{Deserialize, Serialize};

/// Pixels skipped on every side of the frame when scanning the mask
pub const DEFAULT_SEARCH_EDGE: u32 = 10;

/// A detection needs strictly more matching pixels than this
pub const DEFAULT_MIN_PIXEL_COUNT: u32 = 5;

pub const DEFAULT_MIN_SATURATION: u8 = 128;
pub const DEFAULT_MIN_VALUE: u8 = 50;
pub const MAX_SATURATION: u8 = 255;
pub const MAX_VALUE: u8 = 255;

/// Upper end of the 8-bit hue scale (degrees / 2)
pub const MAX_HUE: i32 = 180;

/// Tunables shared by every stage of a color search.
///
/// The defaults assume a bright, saturated target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Border margin excluded from the centroid scan, in pixels
    pub search_edge: u32,
    /// Matching pixel count that must be exceeded for a detection
    pub min_pixel_count: u32,
    pub min_saturation: u8,
    pub min_value: u8,
    pub max_saturation: u8,
    pub max_value: u8,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self {
            search_edge: DEFAULT_SEARCH_EDGE,
            min_pixel_count: DEFAULT_MIN_PIXEL_COUNT,
            min_saturation: DEFAULT_MIN_SATURATION,
            min_value: DEFAULT_MIN_VALUE,
            max_saturation: MAX_SATURATION,
            max_value: MAX_VALUE,
        }
    }

    pub fn with_search_edge(mut self, search_edge: u32) -> Self {
        self.search_edge = search_edge;
        self
    }

    pub fn with_min_pixel_count(mut self, min_pixel_count: u32) -> Self {
        self.min_pixel_count = min_pixel_count;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
