use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;

/// A frame in HSV space. The three channels hold H (0..=180), S and V,
/// stored in the slots an RGB buffer would use for R, G and B.
pub type HsvImage = RgbImage;

/// Mean position of the matching pixels inside the scanned region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Centroid {
    pub column: u32,
    pub row: u32,
    pub pixel_count: u32,
}

impl Centroid {
    pub fn is_detection(&self, min_pixel_count: u32) -> bool {
        self.pixel_count > min_pixel_count
    }
}

/// Everything a single search pass learned about a frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub centroid: Option<Centroid>,
    /// Radians from the center line, negative to the left
    pub direction: Option<f32>,
    /// On-screen height of the object at the centroid column
    pub pixel_height: Option<u32>,
    /// Meters, only present when an object height was supplied
    pub distance: Option<f32>,
}

impl Measurement {
    pub fn found(&self) -> bool {
        self.centroid.is_some()
    }
}

/// One line of the CLI's JSON output
#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub config: &'a SearchConfig,
    #[serde(flatten)]
    pub measurement: Measurement,
}
