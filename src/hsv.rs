use image::{DynamicImage, Rgb, RgbImage};

use crate::models::HsvImage;

/// Convert one RGB pixel to 8-bit HSV.
///
/// Hue is halved so it fits a byte (0..=180), saturation and value span 0..=255.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> Rgb<u8> {
    let Rgb([r, g, b]) = pixel;
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let degrees = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        60.0 * (bf - rf) / delta + 120.0
    } else {
        60.0 * (rf - gf) / delta + 240.0
    };
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };

    let s = if max == 0.0 { 0.0 } else { 255.0 * delta / max };

    Rgb([
        (degrees / 2.0).round().min(180.0) as u8,
        s.round() as u8,
        max as u8,
    ])
}

/// Convert a whole RGB buffer to HSV
pub fn rgb_image_to_hsv(img: &RgbImage) -> HsvImage {
    let mut hsv = img.clone();
    for pixel in hsv.pixels_mut() {
        *pixel = rgb_to_hsv(*pixel);
    }
    hsv
}

/// Convert any decoded image to HSV, dropping alpha
pub fn to_hsv(img: &DynamicImage) -> HsvImage {
    rgb_image_to_hsv(&img.to_rgb8())
}
