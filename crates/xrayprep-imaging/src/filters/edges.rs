// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canny edge detection on the raw 3x3 Sobel gradient.
//
// No smoothing is applied first and gradient strength is the L1 norm
// `|gx| + |gy|`, so the thresholds are on the scale of an unblurred Sobel
// response (a 60-level step scores 240).

use image::{GrayImage, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// tan(22.5°): below this |gy|/|gx| ratio the gradient counts as horizontal.
const TAN_22_5: f32 = 0.414_213_57;
/// tan(67.5°): above this ratio the gradient counts as vertical.
const TAN_67_5: f32 = 2.414_213_6;

/// Produce a binary edge map: 255 on edges, 0 elsewhere.
///
/// Pixels whose gradient magnitude is a local maximum across the edge and
/// exceeds `high` seed edges; local maxima above `low` are kept only when
/// 8-connected to a seed (hysteresis). The thresholds are swapped if given
/// in the wrong order.
pub fn detect_edges(image: &GrayImage, low: f32, high: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }
    let (low, high) = if low > high { (high, low) } else { (low, high) };

    let gx = horizontal_sobel(image);
    let gy = vertical_sobel(image);
    let w = width as usize;
    let h = height as usize;

    let magnitude: Vec<f32> = gx
        .pixels()
        .zip(gy.pixels())
        .map(|(dx, dy)| (dx.0[0] as f32).abs() + (dy.0[0] as f32).abs())
        .collect();
    let at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0.0
        } else {
            magnitude[y as usize * w + x as usize]
        }
    };

    // Non-maximum suppression: 0 = dropped, 1 = weak candidate, 2 = strong.
    let mut class = vec![0u8; w * h];
    let mut seeds = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let m = magnitude[y * w + x];
            if m <= low {
                continue;
            }
            let dx = gx.get_pixel(x as u32, y as u32).0[0] as f32;
            let dy = gy.get_pixel(x as u32, y as u32).0[0] as f32;
            let (xi, yi) = (x as isize, y as isize);
            let ax = dx.abs();
            let ay = dy.abs();

            let is_peak = if ay < ax * TAN_22_5 {
                m > at(xi - 1, yi) && m >= at(xi + 1, yi)
            } else if ay > ax * TAN_67_5 {
                m > at(xi, yi - 1) && m >= at(xi, yi + 1)
            } else {
                let s: isize = if (dx < 0.0) != (dy < 0.0) { -1 } else { 1 };
                m > at(xi - s, yi - 1) && m > at(xi + s, yi + 1)
            };
            if !is_peak {
                continue;
            }

            if m > high {
                class[y * w + x] = 2;
                seeds.push((x, y));
            } else {
                class[y * w + x] = 1;
            }
        }
    }

    // Hysteresis: grow every strong pixel through connected weak candidates.
    let mut output = GrayImage::new(width, height);
    while let Some((x, y)) = seeds.pop() {
        output.put_pixel(x as u32, y as u32, Luma([255]));
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let idx = ny * w + nx;
                if class[idx] == 1 {
                    class[idx] = 2;
                    seeds.push((nx, ny));
                }
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(width: u32, height: u32, left: u8, right: u8) -> GrayImage {
        GrayImage::from_fn(width, height, |x, _| {
            Luma([if x < width / 2 { left } else { right }])
        })
    }

    fn edge_columns(edges: &GrayImage) -> Vec<u32> {
        let mut columns: Vec<u32> = edges
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] == 255)
            .map(|(x, _, _)| x)
            .collect();
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    #[test]
    fn flat_image_has_no_edges() {
        let image = GrayImage::from_pixel(100, 100, Luma([127]));
        let edges = detect_edges(&image, 100.0, 200.0);
        assert_eq!(edges.dimensions(), (100, 100));
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn moderate_step_is_detected_at_raw_sobel_scale() {
        // A 60-level step gives |gx| = 4 * 60 = 240, above the high threshold.
        let image = vertical_step(64, 64, 100, 160);
        let edges = detect_edges(&image, 100.0, 200.0);
        assert_eq!(edge_columns(&edges), vec![31]);
        assert_eq!(edges.pixels().filter(|p| p.0[0] == 255).count(), 64);
    }

    #[test]
    fn weak_step_below_low_threshold_is_ignored() {
        // 4 * 20 = 80 never reaches the low threshold.
        let image = vertical_step(64, 64, 100, 120);
        let edges = detect_edges(&image, 100.0, 200.0);
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn weak_pixels_survive_only_when_connected_to_a_strong_one() {
        // Left half of the boundary is a strong step (240), right half a weak
        // one (160): the weak part joins the strong part along the row, so it
        // is kept. An isolated weak step elsewhere is dropped.
        let image = GrayImage::from_fn(64, 64, |x, y| {
            let strong = y < 32 && x >= 32;
            let weak_connected = y >= 32 && x >= 32;
            if strong {
                Luma([160])
            } else if weak_connected {
                Luma([140])
            } else {
                Luma([100])
            }
        });
        let edges = detect_edges(&image, 100.0, 200.0);
        let boundary: Vec<u8> = (0..64).map(|y| edges.get_pixel(31, y).0[0]).collect();
        assert!(boundary[..30].iter().all(|&v| v == 255));
        assert!(boundary[34..].iter().all(|&v| v == 255));

        let isolated = vertical_step(64, 64, 100, 140);
        assert!(
            detect_edges(&isolated, 100.0, 200.0)
                .pixels()
                .all(|p| p.0[0] == 0)
        );
    }

    #[test]
    fn output_is_binary_and_thin() {
        let image = vertical_step(64, 64, 10, 240);
        let edges = detect_edges(&image, 100.0, 200.0);
        assert!(edges.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert_eq!(edge_columns(&edges), vec![31]);
    }

    #[test]
    fn swapped_thresholds_behave_like_ordered_ones() {
        let image = vertical_step(32, 32, 100, 160);
        assert_eq!(
            detect_edges(&image, 200.0, 100.0),
            detect_edges(&image, 100.0, 200.0)
        );
    }
}
