use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::{Context, Result};
use log::debug;

use crate::models::HsvImage;

/// Data that flows through the pipeline.
/// `image` is the output of the latest step, `frame` is the untouched input.
#[derive(Clone)]
pub struct PipelineData<'a> {
    /// Current stage image; `None` until a step produces one (the mask)
    pub image: Option<DynamicImage>,

    /// The HSV frame the search started from, borrowed for the whole run
    pub frame: &'a HsvImage,

    /// Values computed by steps (e.g. "column", "direction")
    pub metadata: HashMap<String, MetadataValue>,
}

/// Metadata value types
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Float(f32),
    Int(i64),
}

impl<'a> PipelineData<'a> {
    /// Start from a full HSV frame
    pub fn from_frame(frame: &'a HsvImage) -> Self {
        Self {
            image: None,
            frame,
            metadata: HashMap::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.metadata.insert(key.into(), value);
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.metadata.get(key) {
            Some(MetadataValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.metadata.get(key) {
            Some(MetadataValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(v)) => Some(*v),
            _ => None,
        }
    }
}

/// Where and whether to render debug images
#[derive(Clone, Debug)]
pub struct DebugOptions {
    /// Root directory; each run writes into its own numbered subdirectory
    pub output_dir: PathBuf,
    pub render: bool,
}

impl DebugOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            render: true,
        }
    }

    /// Directory for a single run
    pub fn request_dir(&self, request_id: u64) -> PathBuf {
        self.output_dir.join(format!("{:04}", request_id))
    }
}

/// Context available to all pipeline steps
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugOptions>,
    /// Names this run's debug directory
    pub request_id: u64,
}

impl PipelineContext {
    pub fn render_debug(&self) -> bool {
        self.debug.as_ref().is_some_and(|d| d.render)
    }
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform the data, adding whatever metadata this step computes
    fn process<'a>(
        &self,
        data: PipelineData<'a>,
        context: &PipelineContext,
    ) -> Result<PipelineData<'a>>;

    /// Human-readable name for this step (used in logs and debug filenames)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    debug: Option<DebugOptions>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            debug: None,
        }
    }

    /// Render debug images with options already checked by `prepare_debug_dir`
    pub fn with_debug(mut self, options: Option<DebugOptions>) -> Self {
        self.debug = options;
        self
    }

    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order on `frame`
    pub fn run<'a>(&self, frame: &'a HsvImage, request_id: u64) -> Result<PipelineData<'a>> {
        let context = PipelineContext {
            debug: self.debug.clone(),
            request_id,
        };

        if context.render_debug() {
            let input = DynamicImage::ImageRgb8(frame.clone());
            save_debug_image(&context, "00_input.png", &input)?;
        }

        let mut data = PipelineData::from_frame(frame);

        for (step_idx, step) in self.steps.iter().enumerate() {
            debug!("request {}: running step {}", request_id, step.name());
            data = step.process(data, &context)?;

            let filename = format!(
                "{:02}_{}.png",
                step_idx + 1,
                step.name().to_lowercase().replace(' ', "_")
            );
            if let Some(image) = &data.image {
                save_debug_image(&context, &filename, image)?;
            }
        }

        Ok(data)
    }
}

/// Check that the debug directory is usable, creating it if missing.
/// The directory must be empty or non-existent.
pub fn prepare_debug_dir(options: &DebugOptions) -> Result<()> {
    if !options.render {
        return Ok(());
    }

    let dir = &options.output_dir;
    if dir.exists() {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read debug directory {}", dir.display()))?;
        if entries.count() > 0 {
            return Err(anyhow::anyhow!(
                "Debug directory is not empty: {}",
                dir.display()
            ));
        }
    } else {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create debug directory {}", dir.display()))?;
    }
    Ok(())
}

fn save_debug_image(context: &PipelineContext, filename: &str, image: &DynamicImage) -> Result<()> {
    let Some(options) = context.debug.as_ref().filter(|d| d.render) else {
        return Ok(());
    };

    let dir = options.request_dir(context.request_id);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(filename);
    save_image(image, &path)?;

    debug!("Debug: saved {}", path.display());
    Ok(())
}

fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to save debug image {}: {}", path.display(), e))
}
