use crate::config::SearchConfig;
use crate::detection::{centroid, geometry, mask};
use crate::detection::mask::{HsvRange, HueWindow};
use crate::models::Centroid;
use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineStep};
use anyhow::Result;
use image::{DynamicImage, GrayImage, Luma};
use imageproc::drawing::draw_line_segment_mut;
use log::debug;

pub const KEY_FOUND: &str = "found";
pub const KEY_COLUMN: &str = "column";
pub const KEY_ROW: &str = "row";
pub const KEY_PIXEL_COUNT: &str = "pixel_count";
pub const KEY_DIRECTION: &str = "direction";
pub const KEY_PIXEL_HEIGHT: &str = "pixel_height";
pub const KEY_VISUAL_ANGLE: &str = "visual_angle";
pub const KEY_DISTANCE: &str = "distance";

/// Overlay shade for the centroid column
pub const OVERLAY_COLUMN: u8 = 128;
/// Overlay shade for the centroid row
pub const OVERLAY_ROW: u8 = 64;

/// Threshold the HSV frame into a binary mask
pub struct ColorMaskStep {
    pub range: HsvRange,
}

impl ColorMaskStep {
    pub fn new(window: HueWindow, config: &SearchConfig) -> Self {
        Self {
            range: HsvRange::from_window(window, config),
        }
    }
}

impl PipelineStep for ColorMaskStep {
    fn process<'a>(
        &self,
        mut data: PipelineData<'a>,
        _context: &PipelineContext,
    ) -> Result<PipelineData<'a>> {
        let color_mask = mask::make_color_mask(data.frame, &self.range);
        data.image = Some(DynamicImage::ImageLuma8(color_mask));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Color Mask"
    }
}

/// Find the centroid of the lit mask pixels
pub struct CentroidStep {
    pub search_edge: u32,
    pub min_pixel_count: u32,
}

impl CentroidStep {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            search_edge: config.search_edge,
            min_pixel_count: config.min_pixel_count,
        }
    }
}

impl PipelineStep for CentroidStep {
    fn process<'a>(
        &self,
        mut data: PipelineData<'a>,
        context: &PipelineContext,
    ) -> Result<PipelineData<'a>> {
        let mask = data
            .image
            .as_ref()
            .and_then(DynamicImage::as_luma8)
            .ok_or_else(|| anyhow::anyhow!("Centroid step expects a single-channel mask"))?;

        let found = centroid::locate_centroid(mask, self.search_edge, self.min_pixel_count);

        debug!(
            "request {}: centroid {:?}",
            context.request_id,
            found.map(|c| (c.column, c.row, c.pixel_count))
        );

        let overlay = match (context.render_debug(), found) {
            (true, Some(c)) => Some(draw_centroid_overlay(mask, &c)),
            _ => None,
        };

        data.set(KEY_FOUND, MetadataValue::Bool(found.is_some()));
        if let Some(c) = found {
            data.set(KEY_COLUMN, MetadataValue::Int(i64::from(c.column)));
            data.set(KEY_ROW, MetadataValue::Int(i64::from(c.row)));
            data.set(KEY_PIXEL_COUNT, MetadataValue::Int(i64::from(c.pixel_count)));
        }
        if let Some(overlay) = overlay {
            data.image = Some(DynamicImage::ImageLuma8(overlay));
        }

        Ok(data)
    }

    fn name(&self) -> &str {
        "Centroid"
    }
}

/// Angle of the located column from the frame's center line
pub struct DirectionStep {
    pub fov: f32,
}

impl PipelineStep for DirectionStep {
    fn process<'a>(
        &self,
        mut data: PipelineData<'a>,
        _context: &PipelineContext,
    ) -> Result<PipelineData<'a>> {
        if let Some(c) = read_centroid(&data) {
            let direction = geometry::direction_of_column(c.column, data.frame.width(), self.fov);
            data.set(KEY_DIRECTION, MetadataValue::Float(direction));
        }
        Ok(data)
    }

    fn name(&self) -> &str {
        "Direction"
    }
}

/// Distance from the color's on-screen height at the located column
pub struct DistanceStep {
    pub fov: f32,
    pub object_height: f32,
}

impl PipelineStep for DistanceStep {
    fn process<'a>(
        &self,
        mut data: PipelineData<'a>,
        context: &PipelineContext,
    ) -> Result<PipelineData<'a>> {
        let Some(c) = read_centroid(&data) else {
            return Ok(data);
        };

        let pixel_height = geometry::color_pixel_height(data.frame, c.column);
        let angle = geometry::visual_angle(pixel_height, data.frame.height(), self.fov);
        let distance = geometry::distance_from_visual_angle(angle, self.object_height);

        debug!(
            "request {}: pixel height {} at column {}, visual angle {:.4}, distance {:?}",
            context.request_id, pixel_height, c.column, angle, distance
        );

        data.set(KEY_PIXEL_HEIGHT, MetadataValue::Int(i64::from(pixel_height)));
        data.set(KEY_VISUAL_ANGLE, MetadataValue::Float(angle));
        if let Some(distance) = distance {
            data.set(KEY_DISTANCE, MetadataValue::Float(distance));
        }
        Ok(data)
    }

    fn name(&self) -> &str {
        "Distance"
    }
}

/// Rebuild the centroid a `CentroidStep` stored, if it found one
pub fn read_centroid(data: &PipelineData) -> Option<Centroid> {
    if !data.get_bool(KEY_FOUND).unwrap_or(false) {
        return None;
    }
    Some(Centroid {
        column: u32::try_from(data.get_int(KEY_COLUMN)?).ok()?,
        row: u32::try_from(data.get_int(KEY_ROW)?).ok()?,
        pixel_count: u32::try_from(data.get_int(KEY_PIXEL_COUNT)?).ok()?,
    })
}

/// Copy of `mask` with the centroid column and row drawn across the full frame
pub fn draw_centroid_overlay(mask: &GrayImage, centroid: &Centroid) -> GrayImage {
    let mut overlay = mask.clone();
    let (width, height) = overlay.dimensions();
    if width == 0 || height == 0 {
        return overlay;
    }

    let column = centroid.column as f32;
    let row = centroid.row as f32;
    draw_line_segment_mut(
        &mut overlay,
        (column, 0.0),
        (column, (height - 1) as f32),
        Luma([OVERLAY_COLUMN]),
    );
    draw_line_segment_mut(
        &mut overlay,
        (0.0, row),
        ((width - 1) as f32, row),
        Luma([OVERLAY_ROW]),
    );
    overlay
}
