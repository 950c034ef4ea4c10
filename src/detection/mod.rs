pub mod centroid;
pub mod geometry;
pub mod mask;
pub mod steps;

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use log::warn;

use crate::config::SearchConfig;
use crate::detection::mask::HueWindow;
use crate::detection::steps::*;
use crate::models::{Centroid, HsvImage, Measurement};
use crate::pipeline::{DebugOptions, Pipeline, PipelineData, prepare_debug_dir};

/// Returned by [`direction_of_color`] when the color is not in frame
pub const DIRECTION_NOT_FOUND: f32 = 666.0;

/// Returned by [`distance_from_color`] when the color is not in frame
pub const DISTANCE_NOT_FOUND: f32 = -1.0;

/// Searches HSV frames for a single object of one hue
pub struct ColorSearch {
    pub window: HueWindow,
    /// Horizontal field of view in radians
    pub fov: f32,
    pub config: SearchConfig,
    debug: Option<DebugOptions>,
    next_request: AtomicU64,
}

impl ColorSearch {
    pub fn new(hue: i32, tolerance: i32, fov: f32) -> Self {
        Self {
            window: HueWindow::new(hue, tolerance),
            fov,
            config: SearchConfig::default(),
            debug: None,
            next_request: AtomicU64::new(1),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Render every run into `options.output_dir`.
    /// The directory must be empty or non-existent.
    pub fn with_debug(mut self, options: DebugOptions) -> Result<Self> {
        prepare_debug_dir(&options)?;
        self.debug = Some(options);
        Ok(self)
    }

    /// Mask and centroid stages, shared by both estimators
    fn pipeline(&self) -> Pipeline {
        Pipeline::new()
            .with_debug(self.debug.clone())
            .add_step_boxed(Box::new(ColorMaskStep::new(self.window, &self.config)))
            .add_step_boxed(Box::new(CentroidStep::new(&self.config)))
    }

    fn run<'a>(&self, frame: &'a HsvImage, pipeline: Pipeline) -> Result<PipelineData<'a>> {
        let request_id = self.next_request.fetch_add(1, Ordering::Relaxed);
        pipeline.run(frame, request_id)
    }

    /// Centroid of the color, or `None` if too few pixels match
    pub fn locate(&self, frame: &HsvImage) -> Result<Option<Centroid>> {
        if is_empty(frame) {
            warn!("Frame is empty");
            return Ok(None);
        }
        let data = self.run(frame, self.pipeline())?;
        Ok(read_centroid(&data))
    }

    /// Angle of the color from the frame center, in radians
    pub fn direction(&self, frame: &HsvImage) -> Result<Option<f32>> {
        if is_empty(frame) {
            warn!("Frame is empty");
            return Ok(None);
        }
        let pipeline = self
            .pipeline()
            .add_step_boxed(Box::new(DirectionStep { fov: self.fov }));
        let data = self.run(frame, pipeline)?;
        Ok(data.get_float(KEY_DIRECTION))
    }

    /// Distance to the color in meters, given the object's real height
    pub fn distance(&self, frame: &HsvImage, object_height: f32) -> Result<Option<f32>> {
        if is_empty(frame) {
            warn!("Frame is empty");
            return Ok(None);
        }
        let pipeline = self.pipeline().add_step_boxed(Box::new(DistanceStep {
            fov: self.fov,
            object_height,
        }));
        let data = self.run(frame, pipeline)?;
        Ok(data.get_float(KEY_DISTANCE))
    }

    /// Both estimates from a single mask and centroid pass.
    /// Distance is only computed when `object_height` is given.
    pub fn measure(&self, frame: &HsvImage, object_height: Option<f32>) -> Result<Measurement> {
        if is_empty(frame) {
            warn!("Frame is empty");
            return Ok(Measurement::default());
        }

        let mut pipeline = self
            .pipeline()
            .add_step_boxed(Box::new(DirectionStep { fov: self.fov }));
        if let Some(object_height) = object_height {
            pipeline = pipeline.add_step_boxed(Box::new(DistanceStep {
                fov: self.fov,
                object_height,
            }));
        }

        let data = self.run(frame, pipeline)?;
        Ok(Measurement {
            centroid: read_centroid(&data),
            direction: data.get_float(KEY_DIRECTION),
            pixel_height: data
                .get_int(KEY_PIXEL_HEIGHT)
                .and_then(|h| u32::try_from(h).ok()),
            distance: data.get_float(KEY_DISTANCE),
        })
    }
}

fn is_empty(frame: &HsvImage) -> bool {
    frame.width() == 0 || frame.height() == 0
}

/// Direction of the color relative to the frame center, in radians.
///
/// Negative is left of center, positive is right, 0.0 is dead center.
/// Returns [`DIRECTION_NOT_FOUND`] (666.0) for an empty frame or when the
/// color is not in frame.
pub fn direction_of_color(frame: &HsvImage, fov: f32, hue: i32, tolerance: i32) -> f32 {
    match ColorSearch::new(hue, tolerance, fov).direction(frame) {
        Ok(direction) => direction.unwrap_or(DIRECTION_NOT_FOUND),
        Err(e) => {
            warn!("Direction search failed: {:#}", e);
            DIRECTION_NOT_FOUND
        }
    }
}

/// Distance to the color in meters, given its real height in meters.
///
/// Returns [`DISTANCE_NOT_FOUND`] (-1.0) for an empty frame, when the color is
/// not in frame, or when no height could be measured at the located column.
pub fn distance_from_color(
    frame: &HsvImage,
    fov: f32,
    hue: i32,
    tolerance: i32,
    object_height: f32,
) -> f32 {
    match ColorSearch::new(hue, tolerance, fov).distance(frame, object_height) {
        Ok(distance) => distance.unwrap_or(DISTANCE_NOT_FOUND),
        Err(e) => {
            warn!("Distance search failed: {:#}", e);
            DISTANCE_NOT_FOUND
        }
    }
}
