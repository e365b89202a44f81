//! Dominant color derivation
//!
//! A visual hint for the UI: downsample the cover to 50x50 and average the
//! channels. Best-effort, never blocks correctness.

use image::imageops::FilterType;

/// Downsample edge length
const SAMPLE_SIZE: u32 = 50;

/// Compute the dominant color of an image as mean RGB
///
/// Returns `None` when the bytes cannot be decoded as an image.
pub fn dominant_color(data: &[u8]) -> Option<[u8; 3]> {
    let img = image::load_from_memory(data).ok()?;
    let small = img.resize_exact(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Nearest);
    let rgb = small.to_rgb8();

    let pixel_count = u64::from(SAMPLE_SIZE) * u64::from(SAMPLE_SIZE);
    let mut sums = [0u64; 3];
    for pixel in rgb.pixels() {
        sums[0] += u64::from(pixel[0]);
        sums[1] += u64::from(pixel[1]);
        sums[2] += u64::from(pixel[2]);
    }

    Some([
        (sums[0] / pixel_count) as u8,
        (sums[1] / pixel_count) as u8,
        (sums[2] / pixel_count) as u8,
    ])
}
