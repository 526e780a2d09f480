// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enhancement filters — each one is a pure function from a grayscale image to
// a new grayscale image of the same size.

pub mod clahe;
pub mod denoise;
pub mod edges;
pub mod equalize;

use image::GrayImage;
use xrayprep_core::{FilterKind, FilterSettings};

pub use clahe::adaptive_equalize;
pub use denoise::gaussian_denoise;
pub use edges::detect_edges;
pub use equalize::equalize_histogram;

/// Run the filter named by `kind` with the given parameters.
pub fn apply(kind: FilterKind, image: &GrayImage, settings: &FilterSettings) -> GrayImage {
    match kind {
        FilterKind::EqualizeHistogram => equalize_histogram(image),
        FilterKind::AdaptiveContrast => {
            adaptive_equalize(image, settings.clahe_clip_limit, settings.clahe_tile_grid)
        }
        FilterKind::DetectEdges => detect_edges(image, settings.canny_low, settings.canny_high),
        FilterKind::Denoise => gaussian_denoise(image, settings.denoise_kernel_size),
    }
}

// -- Shared helpers -----------------------------------------------------------

/// Intensity histogram of a grayscale image.
pub(crate) fn histogram(image: &GrayImage) -> [u32; 256] {
    let mut bins = [0u32; 256];
    for pixel in image.pixels() {
        bins[pixel.0[0] as usize] += 1;
    }
    bins
}

/// Map every pixel through a 256-entry lookup table.
pub(crate) fn apply_lut(image: &GrayImage, lut: &[u8; 256]) -> GrayImage {
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        pixel.0[0] = lut[pixel.0[0] as usize];
    }
    output
}

/// Mirror an out-of-range index back into `0..len` without repeating the
/// edge sample (`dcb|abcd|cba`).
pub(crate) fn reflect_101(index: i64, len: u32) -> u32 {
    let len = len as i64;
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let folded = index.rem_euclid(period);
    (if folded < len { folded } else { period - folded }) as u32
}
