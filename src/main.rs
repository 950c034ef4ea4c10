use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use log::{LevelFilter, info};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

use colorseek::{ColorSearch, DebugOptions, FrameReport, Measurement, SearchConfig, hsv};

#[derive(Parser)]
#[command(name = "colorseek")]
#[command(about = "Find a colored object in images and estimate its direction and distance")]
struct Cli {
    /// Input image files (RGB, converted to HSV before searching)
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,

    /// Target hue on the 0-180 scale
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=180))]
    hue: i32,

    /// Hue tolerance on either side of the target
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i32).range(0..=180))]
    tolerance: i32,

    /// Horizontal field of view in radians
    #[arg(long, conflicts_with = "fov_deg")]
    fov: Option<f32>,

    /// Horizontal field of view in degrees
    #[arg(long)]
    fov_deg: Option<f32>,

    /// Known height of the object in meters; enables distance estimation
    #[arg(long)]
    object_height: Option<f32>,

    /// Border margin excluded from the search, in pixels
    #[arg(long, default_value_t = colorseek::config::DEFAULT_SEARCH_EDGE)]
    search_edge: u32,

    /// Matching pixel count that must be exceeded for a detection
    #[arg(long, default_value_t = colorseek::config::DEFAULT_MIN_PIXEL_COUNT)]
    min_pixels: u32,

    /// Minimum HSV saturation for a matching pixel
    #[arg(long, default_value_t = colorseek::config::DEFAULT_MIN_SATURATION)]
    min_saturation: u8,

    /// Minimum HSV value for a matching pixel
    #[arg(long, default_value_t = colorseek::config::DEFAULT_MIN_VALUE)]
    min_value: u8,

    /// Save debug images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print one JSON object per image
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .unwrap_or_else(|err| eprintln!("Failed to initialize logger: {err}"));

    let fov = match (args.fov, args.fov_deg) {
        (Some(rad), _) => rad,
        (None, Some(deg)) => deg.to_radians(),
        (None, None) => anyhow::bail!("Either --fov or --fov-deg is required"),
    };

    let config = SearchConfig {
        min_saturation: args.min_saturation,
        min_value: args.min_value,
        ..SearchConfig::default()
    }
    .with_search_edge(args.search_edge)
    .with_min_pixel_count(args.min_pixels);

    let mut search = ColorSearch::new(args.hue, args.tolerance, fov).with_config(config);
    if let Some(debug_dir) = args.debug_out {
        search = search.with_debug(DebugOptions::new(debug_dir))?;
    }

    for path in &args.images {
        info!("Loading image: {}", path.display());

        let img = ImageReader::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .decode()
            .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
        let frame = hsv::to_hsv(&img);

        let measurement = search.measure(&frame, args.object_height)?;

        if args.json {
            let report = FrameReport {
                image: path.display().to_string(),
                width: frame.width(),
                height: frame.height(),
                config: &search.config,
                measurement,
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_measurement(path, &measurement, args.object_height.is_some());
        }
    }

    Ok(())
}

fn print_measurement(path: &std::path::Path, m: &Measurement, want_distance: bool) {
    println!("\n=== {} ===", path.display());

    let Some(centroid) = &m.centroid else {
        println!("Color not found.");
        return;
    };

    println!(
        "Centroid: column {}, row {} ({} pixels)",
        centroid.column, centroid.row, centroid.pixel_count
    );
    if let Some(direction) = m.direction {
        println!(
            "Direction: {:.4} rad ({:.2}°)",
            direction,
            direction.to_degrees()
        );
    }
    if want_distance {
        match m.distance {
            Some(distance) => println!("Distance: {:.3} m", distance),
            None => println!(
                "Distance: unavailable (pixel height {})",
                m.pixel_height.unwrap_or(0)
            ),
        }
    }
}
