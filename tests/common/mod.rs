mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from colorseek for tests
pub use colorseek::{
    Centroid, ColorSearch, DIRECTION_NOT_FOUND, DISTANCE_NOT_FOUND, DebugOptions, HsvImage,
    SearchConfig, direction_of_color, distance_from_color,
};
