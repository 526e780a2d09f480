// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global histogram equalization.

use image::GrayImage;

use super::{apply_lut, histogram};

/// Remap intensities so the output histogram is approximately uniform.
///
/// The darkest populated intensity maps to 0 and the brightest to 255; the
/// levels in between follow the cumulative histogram. An image with a single
/// populated intensity is returned unchanged.
pub fn equalize_histogram(image: &GrayImage) -> GrayImage {
    let bins = histogram(image);
    apply_lut(image, &equalization_lut(&bins))
}

/// Build the equalization lookup table for a histogram.
fn equalization_lut(bins: &[u32; 256]) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = i as u8;
    }

    let total: u64 = bins.iter().map(|&count| count as u64).sum();
    let Some(first) = bins.iter().position(|&count| count > 0) else {
        return lut;
    };
    if bins[first] as u64 == total {
        return lut;
    }

    let scale = 255.0 / (total - bins[first] as u64) as f64;
    let mut cumulative: u64 = 0;
    lut[first] = 0;
    for i in first + 1..256 {
        cumulative += bins[i] as u64;
        lut[i] = (cumulative as f64 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn narrow_range_is_stretched_to_full_scale() {
        // Two-level image: 100 and 110.
        let image = GrayImage::from_fn(10, 10, |x, _| Luma([if x < 5 { 100 } else { 110 }]));
        let out = equalize_histogram(&image);
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(9, 9).0[0], 255);
    }

    #[test]
    fn flat_image_is_unchanged() {
        let image = GrayImage::from_pixel(16, 16, Luma([127]));
        assert_eq!(equalize_histogram(&image), image);
    }

    #[test]
    fn mapping_is_monotonic() {
        let image = GrayImage::from_fn(64, 4, |x, y| Luma([(40 + x + y * 3) as u8]));
        let lut = equalization_lut(&histogram(&image));
        let used: Vec<u8> = (40..=(40 + 63 + 9)).map(|v| lut[v as usize]).collect();
        assert!(used.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn repeated_application_is_stable_in_shape() {
        let image = GrayImage::from_fn(32, 32, |x, y| Luma([((x * y) % 97) as u8]));
        let once = equalize_histogram(&image);
        let twice = equalize_histogram(&once);
        assert_eq!(twice.dimensions(), image.dimensions());
        assert_eq!(equalize_histogram(&image), once);
    }
}
