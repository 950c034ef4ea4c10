use image::GrayImage;

use crate::models::Centroid;

/// Mean column and row of every lit mask pixel, ignoring `search_edge`
/// pixels on each side.
///
/// The whole interior is accumulated, not only the topmost lit row, so for a
/// filled disc this lands on the disc center. Returns `None` when nothing is
/// lit, which also covers masks too small to have an interior.
pub fn scan_centroid(mask: &GrayImage, search_edge: u32) -> Option<Centroid> {
    let (width, height) = mask.dimensions();

    let mut col_total: u64 = 0;
    let mut row_total: u64 = 0;
    let mut count: u64 = 0;

    for row in search_edge..height.saturating_sub(search_edge) {
        for column in search_edge..width.saturating_sub(search_edge) {
            if mask.get_pixel(column, row)[0] != 0 {
                col_total += u64::from(column);
                row_total += u64::from(row);
                count += 1;
            }
        }
    }

    if count == 0 {
        return None;
    }

    Some(Centroid {
        column: (col_total / count) as u32,
        row: (row_total / count) as u32,
        pixel_count: count as u32,
    })
}

/// Locate the colored region, requiring more than `min_pixel_count` lit pixels
pub fn locate_centroid(
    mask: &GrayImage,
    search_edge: u32,
    min_pixel_count: u32,
) -> Option<Centroid> {
    scan_centroid(mask, search_edge).filter(|c| c.is_detection(min_pixel_count))
}
