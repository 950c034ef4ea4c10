#![allow(dead_code)]

use colorseek::HsvImage;
use image::Rgb;
use std::ops::RangeInclusive;

/// Hue the synthetic blobs are painted with
pub const TARGET_HUE: i32 = 60;
pub const TOLERANCE: i32 = 10;

/// Saturated, bright green in HSV
pub const GREEN: Rgb<u8> = Rgb([60, 200, 200]);
/// Saturated, bright blue in HSV
pub const BLUE: Rgb<u8> = Rgb([120, 200, 200]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// An all-black HSV frame
pub fn blank_frame(width: u32, height: u32) -> HsvImage {
    HsvImage::from_pixel(width, height, BLACK)
}

/// Paint a filled rectangle (inclusive ranges) onto `frame`
pub fn paint_block(
    frame: &mut HsvImage,
    columns: RangeInclusive<u32>,
    rows: RangeInclusive<u32>,
    color: Rgb<u8>,
) {
    for row in rows {
        for column in columns.clone() {
            frame.put_pixel(column, row, color);
        }
    }
}

/// A black frame with one green rectangle
pub fn frame_with_block(
    width: u32,
    height: u32,
    columns: RangeInclusive<u32>,
    rows: RangeInclusive<u32>,
) -> HsvImage {
    let mut frame = blank_frame(width, height);
    paint_block(&mut frame, columns, rows, GREEN);
    frame
}

/// A black frame with a filled green disc
pub fn frame_with_disc(width: u32, height: u32, cx: u32, cy: u32, radius: u32) -> HsvImage {
    HsvImage::from_fn(width, height, |x, y| {
        let dx = x as i64 - cx as i64;
        let dy = y as i64 - cy as i64;
        if dx * dx + dy * dy <= (radius as i64) * (radius as i64) {
            GREEN
        } else {
            BLACK
        }
    })
}

/// The 100x100 scenario frame: an 11x11 block at columns 45-55, rows 40-50
pub fn centered_block_frame() -> HsvImage {
    frame_with_block(100, 100, 45..=55, 40..=50)
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}
