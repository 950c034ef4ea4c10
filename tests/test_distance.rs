mod common;

use colorseek::detection::geometry::{color_pixel_height, distance_from_visual_angle, visual_angle};
use common::*;
use image::Rgb;

fn expected_distance(pixel_height: u32, image_height: u32, fov: f32, object_height: f32) -> f32 {
    let angle = pixel_height as f32 / image_height as f32 * fov;
    (object_height / 2.0) / (angle / 2.0).tan()
}

/// A block `pixel_height` rows tall, centered vertically, at columns 45-55
fn tall_block(pixel_height: u32) -> HsvImage {
    let top = 50 - pixel_height / 2;
    frame_with_block(100, 100, 45..=55, top..=top + pixel_height - 1)
}

#[test]
fn test_distance_matches_similar_triangles() {
    let frame = frame_with_block(100, 100, 45..=55, 30..=69);
    let distance = distance_from_color(&frame, 1.0, TARGET_HUE, TOLERANCE, 0.5);

    assert_close(distance, expected_distance(40, 100, 1.0, 0.5));
}

#[test]
fn test_disc_distance() {
    let frame = frame_with_disc(120, 120, 60, 60, 20);
    let distance = distance_from_color(&frame, 0.8, TARGET_HUE, TOLERANCE, 0.3);

    // The centroid column passes through the disc center, where it is 41 pixels tall
    assert_close(distance, expected_distance(41, 120, 0.8, 0.3));
}

#[test]
fn test_taller_blob_is_closer() {
    let distances: Vec<f32> = [10, 20, 40, 60, 80]
        .into_iter()
        .map(|h| distance_from_color(&tall_block(h), 1.0, TARGET_HUE, TOLERANCE, 0.5))
        .collect();

    assert!(distances.iter().all(|d| *d > 0.0), "{distances:?}");
    assert!(distances.windows(2).all(|w| w[0] > w[1]), "{distances:?}");
}

#[test]
fn test_height_counts_rows_inside_border() {
    // Spans the full frame height, including the 10 pixel margin
    let frame = frame_with_block(100, 100, 45..=55, 0..=99);
    let distance = distance_from_color(&frame, 1.0, TARGET_HUE, TOLERANCE, 0.5);

    assert_close(distance, 0.25 / 0.5f32.tan());
}

#[test]
fn test_missing_color_returns_sentinel() {
    assert_eq!(
        distance_from_color(&centered_block_frame(), 1.0, 120, 10, 0.5),
        DISTANCE_NOT_FOUND
    );
    assert_eq!(
        distance_from_color(&blank_frame(100, 100), 1.0, TARGET_HUE, TOLERANCE, 0.5),
        -1.0
    );
}

#[test]
fn test_empty_frame_returns_sentinel() {
    let frame = HsvImage::new(0, 0);
    assert_eq!(
        distance_from_color(&frame, 1.0, TARGET_HUE, TOLERANCE, 0.5),
        DISTANCE_NOT_FOUND
    );
}

#[test]
fn test_border_blob_returns_sentinel() {
    let frame = frame_with_block(100, 100, 0..=8, 20..=80);
    assert_eq!(
        distance_from_color(&frame, 1.0, TARGET_HUE, TOLERANCE, 0.5),
        DISTANCE_NOT_FOUND
    );
}

#[test]
fn test_zero_pixel_height_returns_sentinel() {
    // Hue 0 matches the mask, but a zero channel never counts toward height
    let mut frame = blank_frame(100, 100);
    paint_block(&mut frame, 45..=55, 40..=50, Rgb([0, 200, 200]));

    assert!(ColorSearch::new(0, 5, 1.0).locate(&frame).unwrap().is_some());
    assert_eq!(distance_from_color(&frame, 1.0, 0, 5, 0.5), DISTANCE_NOT_FOUND);
}

#[test]
fn test_height_reads_frame_not_mask() {
    // Blue pixels above the green block fail the mask but still count toward height
    let mut frame = centered_block_frame();
    paint_block(&mut frame, 50..=50, 0..=9, BLUE);

    assert_eq!(color_pixel_height(&frame, 50), 21);
    assert_close(
        distance_from_color(&frame, 1.0, TARGET_HUE, TOLERANCE, 0.5),
        expected_distance(21, 100, 1.0, 0.5),
    );
}

#[test]
fn test_color_pixel_height_out_of_range_column() {
    assert_eq!(color_pixel_height(&centered_block_frame(), 100), 0);
}

#[test]
fn test_visual_angle_and_distance_guards() {
    assert_close(visual_angle(50, 100, 1.0), 0.5);
    assert_eq!(visual_angle(10, 0, 1.0), 0.0);

    assert_eq!(distance_from_visual_angle(0.0, 1.0), None);
    // Past a half turn the tangent turns negative
    assert_eq!(distance_from_visual_angle(4.0, 1.0), None);
    assert_close(
        distance_from_visual_angle(1.0, 2.0).expect("valid angle"),
        1.0 / 0.5f32.tan(),
    );
}

#[test]
fn test_measure_reports_both_estimates() -> anyhow::Result<()> {
    let frame = frame_with_block(100, 100, 70..=80, 30..=69);
    let search = ColorSearch::new(TARGET_HUE, TOLERANCE, 1.0);

    let m = search.measure(&frame, Some(0.5))?;
    assert!(m.found());
    assert_eq!(m.centroid.map(|c| (c.column, c.row)), Some((75, 49)));
    assert_close(m.direction.expect("direction"), 0.25);
    assert_eq!(m.pixel_height, Some(40));
    assert_close(m.distance.expect("distance"), expected_distance(40, 100, 1.0, 0.5));

    let without_height = search.measure(&frame, None)?;
    assert_eq!(without_height.distance, None);
    assert_eq!(without_height.pixel_height, None);

    let missing = search.measure(&blank_frame(100, 100), Some(0.5))?;
    assert!(!missing.found());
    assert_eq!(missing.direction, None);
    assert_eq!(missing.distance, None);

    Ok(())
}

#[test]
fn test_typed_distance_matches_sentinel_api() -> anyhow::Result<()> {
    let frame = tall_block(30);
    let search = ColorSearch::new(TARGET_HUE, TOLERANCE, 1.0);

    let distance = search.distance(&frame, 0.5)?.expect("block should be found");
    assert_close(distance, distance_from_color(&frame, 1.0, TARGET_HUE, TOLERANCE, 0.5));
    assert_eq!(search.distance(&HsvImage::new(0, 0), 0.5)?, None);

    Ok(())
}
