use crate::models::HsvImage;

/// Angle of `column` from the vertical center line, scaled linearly so the
/// frame edges sit at ±fov/2. Negative is left of center.
pub fn direction_of_column(column: u32, width: u32, fov: f32) -> f32 {
    let half_width = width as f32 / 2.0;
    let proportion = (column as f32 - half_width) / half_width;
    proportion * (fov / 2.0)
}

/// Count the pixels in `column` whose three channels are all nonzero.
///
/// Every row is read, including the border margin the centroid scan skips.
pub fn color_pixel_height(frame: &HsvImage, column: u32) -> u32 {
    if column >= frame.width() {
        return 0;
    }

    (0..frame.height())
        .filter(|&row| frame.get_pixel(column, row).0.iter().all(|&c| c != 0))
        .count() as u32
}

/// Angle subtended by `pixel_height` pixels out of `image_height`
pub fn visual_angle(pixel_height: u32, image_height: u32, fov: f32) -> f32 {
    if image_height == 0 {
        return 0.0;
    }
    (pixel_height as f32 / image_height as f32) * fov
}

/// Distance to an object of `object_height` meters that subtends
/// `visual_angle` radians. `None` when the angle gives no finite, positive
/// distance (zero height on screen, or an angle past a half turn).
pub fn distance_from_visual_angle(visual_angle: f32, object_height: f32) -> Option<f32> {
    if visual_angle <= 0.0 {
        return None;
    }

    let distance = (object_height / 2.0) / (visual_angle / 2.0).tan();
    (distance.is_finite() && distance > 0.0).then_some(distance)
}
