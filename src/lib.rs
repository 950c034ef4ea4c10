pub mod config;
pub mod detection;
pub mod hsv;
pub mod models;
pub mod pipeline;

pub use config::SearchConfig;
pub use detection::{
    ColorSearch, DIRECTION_NOT_FOUND, DISTANCE_NOT_FOUND, direction_of_color, distance_from_color,
};
pub use models::{Centroid, FrameReport, HsvImage, Measurement};
pub use pipeline::{
    DebugOptions, MetadataValue, Pipeline, PipelineContext, PipelineData, PipelineStep,
    prepare_debug_dir,
};
