// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gaussian smoothing with a fixed square kernel.

use image::{GrayImage, Luma};
use xrayprep_core::config::MAX_DENOISE_KERNEL_SIZE;

use super::reflect_101;

/// Binomial taps used for small kernels when no sigma is given.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// Blur with a `kernel_size` x `kernel_size` Gaussian whose sigma is derived
/// from the size.
///
/// The kernel is separable, so rows and columns are filtered in two passes.
/// Borders are reflected and results rounded, so a flat field comes back
/// unchanged. Even sizes are rounded up to the next odd size and anything
/// above `MAX_DENOISE_KERNEL_SIZE` is clamped to it.
pub fn gaussian_denoise(image: &GrayImage, kernel_size: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let kernel = gaussian_kernel(kernel_size.min(MAX_DENOISE_KERNEL_SIZE) | 1);
    let radius = (kernel.len() / 2) as i64;

    // Horizontal pass into a float buffer.
    let mut rows = vec![0f32; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = reflect_101(x as i64 + k as i64 - radius, width);
                acc += weight * image.get_pixel(sx, y).0[0] as f32;
            }
            rows[(y * width + x) as usize] = acc;
        }
    }

    // Vertical pass, rounded back to 8 bits.
    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0.0;
        for (k, weight) in kernel.iter().enumerate() {
            let sy = reflect_101(y as i64 + k as i64 - radius, height);
            acc += weight * rows[(sy * width + x) as usize];
        }
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    })
}

/// Normalised 1-D Gaussian taps for an odd kernel size.
///
/// Sizes up to 7 use the binomial tables; larger sizes use
/// `sigma = 0.3 * ((size - 1) / 2 - 1) + 0.8`.
fn gaussian_kernel(size: u32) -> Vec<f32> {
    if let Some(taps) = SMALL_KERNELS.get((size / 2) as usize) {
        return taps.to_vec();
    }

    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let radius = (size / 2) as f64;
    let raw: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - radius;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|w| (w / sum) as f32).collect()
}
