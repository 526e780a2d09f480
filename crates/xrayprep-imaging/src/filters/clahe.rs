// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contrast-limited adaptive histogram equalization (CLAHE).
//
// The image is split into a grid of tiles. Each tile gets its own equalization
// table built from a clipped histogram, and every output pixel blends the
// tables of the four nearest tile centres bilinearly so tile seams vanish.

use image::{GrayImage, Luma};
use xrayprep_core::config::MAX_CLAHE_TILES;

use super::reflect_101;

/// Apply CLAHE with the given clip limit and `(columns, rows)` tile grid.
///
/// `clip_limit` is relative to a flat histogram: a bin may hold at most
/// `clip_limit * tile_area / 256` samples (never less than one) before the
/// excess is redistributed. A non-positive limit disables clipping. Tiles that
/// hang past the image edge read reflected pixels. Each grid axis is clamped
/// to `1..=MAX_CLAHE_TILES`.
pub fn adaptive_equalize(image: &GrayImage, clip_limit: f32, grid: (u32, u32)) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let tiles_x = grid.0.clamp(1, MAX_CLAHE_TILES);
    let tiles_y = grid.1.clamp(1, MAX_CLAHE_TILES);
    let tile_w = width.div_ceil(tiles_x);
    let tile_h = height.div_ceil(tiles_y);
    let tile_area = tile_w as u64 * tile_h as u64;

    let clip = if clip_limit > 0.0 {
        Some(((clip_limit as f64 * tile_area as f64 / 256.0) as u32).max(1))
    } else {
        None
    };
    let lut_scale = 255.0 / tile_area as f64;

    let mut luts = Vec::with_capacity(tiles_x as usize * tiles_y as usize);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let mut bins = tile_histogram(image, tx * tile_w, ty * tile_h, tile_w, tile_h);
            if let Some(limit) = clip {
                clip_histogram(&mut bins, limit);
            }
            luts.push(cumulative_lut(&bins, lut_scale));
        }
    }

    let columns: Vec<Blend> = (0..width)
        .map(|x| Blend::new(x, tile_w, tiles_x))
        .collect();

    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        let row = Blend::new(y, tile_h, tiles_y);
        let upper = row.low * tiles_x as usize;
        let lower = row.high * tiles_x as usize;
        for (x, col) in columns.iter().enumerate() {
            let v = image.get_pixel(x as u32, y).0[0] as usize;
            let top = luts[upper + col.low][v] as f32 * (1.0 - col.weight)
                + luts[upper + col.high][v] as f32 * col.weight;
            let bottom = luts[lower + col.low][v] as f32 * (1.0 - col.weight)
                + luts[lower + col.high][v] as f32 * col.weight;
            let value = top * (1.0 - row.weight) + bottom * row.weight;
            output.put_pixel(x as u32, y, Luma([value.round().clamp(0.0, 255.0) as u8]));
        }
    }
    output
}

/// Neighbouring tile indices along one axis and the weight of the higher one.
#[derive(Debug, Clone, Copy)]
struct Blend {
    low: usize,
    high: usize,
    weight: f32,
}

impl Blend {
    fn new(coord: u32, tile_len: u32, tiles: u32) -> Self {
        let pos = coord as f32 / tile_len as f32 - 0.5;
        let base = pos.floor();
        let weight = pos - base;
        let low = (base as i64).max(0) as usize;
        let high = ((base as i64) + 1).min(tiles as i64 - 1).max(0) as usize;
        Self { low, high, weight }
    }
}

/// Histogram of one tile, reading reflected pixels past the image edge.
fn tile_histogram(image: &GrayImage, x0: u32, y0: u32, tile_w: u32, tile_h: u32) -> [u32; 256] {
    let (width, height) = image.dimensions();
    let mut bins = [0u32; 256];
    for y in y0..y0 + tile_h {
        let sy = if y < height { y } else { reflect_101(y as i64, height) };
        for x in x0..x0 + tile_w {
            let sx = if x < width { x } else { reflect_101(x as i64, width) };
            bins[image.get_pixel(sx, sy).0[0] as usize] += 1;
        }
    }
    bins
}

/// Cap every bin at `limit` and spread the clipped excess back over all bins.
///
/// The excess is shared evenly; whatever does not divide by 256 is handed out
/// one sample at a time at a fixed stride starting from bin 0.
fn clip_histogram(bins: &mut [u32; 256], limit: u32) {
    let mut excess: u32 = 0;
    for bin in bins.iter_mut() {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }
    if excess == 0 {
        return;
    }

    let batch = excess / 256;
    let mut residual = excess - batch * 256;
    for bin in bins.iter_mut() {
        *bin += batch;
    }
    if residual > 0 {
        let step = (256 / residual).max(1) as usize;
        let mut i = 0;
        while i < 256 && residual > 0 {
            bins[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

/// Equalization table for a (clipped) tile histogram.
fn cumulative_lut(bins: &[u32; 256], scale: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut cumulative: u64 = 0;
    for (entry, &count) in lut.iter_mut().zip(bins.iter()) {
        cumulative += count as u64;
        *entry = (cumulative as f64 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([(60 + (x + y) % 40) as u8]))
    }

    #[test]
    fn clipping_preserves_sample_count() {
        let mut bins = [0u32; 256];
        bins[10] = 900;
        bins[20] = 100;
        clip_histogram(&mut bins, 16);
        assert_eq!(bins.iter().sum::<u32>(), 1000);
        assert!(bins[10] <= 16 + 4);
    }

    #[test]
    fn output_keeps_dimensions_for_uneven_sizes() {
        let image = gradient(101, 67);
        let out = adaptive_equalize(&image, 2.0, (8, 8));
        assert_eq!(out.dimensions(), (101, 67));
    }

    #[test]
    fn is_deterministic() {
        let image = gradient(64, 64);
        assert_eq!(
            adaptive_equalize(&image, 2.0, (8, 8)),
            adaptive_equalize(&image, 2.0, (8, 8))
        );
    }

    #[test]
    fn increases_local_contrast() {
        let image = gradient(64, 64);
        let out = adaptive_equalize(&image, 2.0, (8, 8));
        let spread = |img: &GrayImage| {
            let min = img.pixels().map(|p| p.0[0]).min().unwrap();
            let max = img.pixels().map(|p| p.0[0]).max().unwrap();
            max - min
        };
        assert!(spread(&out) > spread(&image));
    }

    #[test]
    fn grid_larger_than_image_is_handled() {
        let image = gradient(5, 3);
        let out = adaptive_equalize(&image, 2.0, (8, 8));
        assert_eq!(out.dimensions(), (5, 3));
    }

    /// Left tiles hold only 100s; right tiles hold 50s in columns 8..12 and
    /// 150s in columns 12..16. With clipping off the tile tables are
    /// left: v >= 100 -> 255, else 0; right: v < 50 -> 0, v < 150 -> 128,
    /// else 255. Columns between tile centres (x = 4 and x = 12) blend the
    /// two tables linearly; columns outside them use one table only.
    #[test]
    fn tile_tables_blend_bilinearly_between_centres() {
        let image = GrayImage::from_fn(16, 16, |x, _| {
            Luma([match x {
                0..8 => 100,
                8..12 => 50,
                _ => 150,
            }])
        });
        let out = adaptive_equalize(&image, 0.0, (2, 2));

        let row: Vec<u8> = (0..16).map(|x| out.get_pixel(x, 5).0[0]).collect();
        assert_eq!(
            row,
            vec![
                255, 255, 255, 255, // clamped to the left tile
                255, 239, 223, 207, // 100 blended from 255 towards 128
                64, 80, 96, 112, // 50 blended from 0 towards 128
                255, 255, 255, 255, // 150 is 255 in the right tile
            ]
        );
        // Top and bottom tile rows are identical, so every row matches.
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(out.get_pixel(x, y).0[0], row[x as usize], "at ({x}, {y})");
            }
        }
    }

    /// A near-flat tile (100/101 checkerboard, area 256) would be stretched
    /// to 128/255 without clipping. Clip 2.0 caps each bin at 2 samples and
    /// spreads the 252 excess samples over bins 0..252, which keeps the two
    /// levels 3 apart.
    #[test]
    fn clip_limit_restrains_amplification() {
        let image = GrayImage::from_fn(16, 16, |x, y| Luma([if (x + y) % 2 == 0 { 100 } else { 101 }]));

        let unclipped = adaptive_equalize(&image, 0.0, (1, 1));
        assert_eq!(unclipped.get_pixel(0, 0).0[0], 128);
        assert_eq!(unclipped.get_pixel(1, 0).0[0], 255);

        let clipped = adaptive_equalize(&image, 2.0, (1, 1));
        assert_eq!(clipped.get_pixel(0, 0).0[0], 103);
        assert_eq!(clipped.get_pixel(1, 0).0[0], 106);
    }

    #[test]
    fn oversized_grid_is_clamped() {
        let image = gradient(20, 20);
        assert_eq!(
            adaptive_equalize(&image, 2.0, (70_000, 70_000)),
            adaptive_equalize(&image, 2.0, (MAX_CLAHE_TILES, MAX_CLAHE_TILES))
        );
    }

    #[test]
    fn flat_image_stays_flat() {
        let image = GrayImage::from_pixel(32, 32, Luma([90]));
        let out = adaptive_equalize(&image, 2.0, (8, 8));
        let first = out.get_pixel(0, 0).0[0];
        assert!(out.pixels().all(|p| p.0[0] == first));
    }
}
