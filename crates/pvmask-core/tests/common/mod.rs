#![allow(dead_code)]

use ndarray::{Array2, Array3};
use pvmask_core::raster::{MultiBandImage, RegionMask};

/// Band count of a Sentinel-2 MSI stack.
pub const BANDS: usize = 13;

/// SWIR reflectance used by [`image_with_index`].
const SWIR: f32 = 0.5;

/// Build a 13-band image whose NDPI equals `index` at every pixel.
///
/// The SWIR band is held at 0.5 and every other band at `0.5 * (1 - v)`,
/// which inverts the NDPI formula for `v` in (-1, 1).
pub fn image_with_index(index: &Array2<f32>) -> MultiBandImage {
    let (h, w) = index.dim();
    let swir_band = BANDS - 2;
    let data = Array3::from_shape_fn((h, w, BANDS), |(row, col, band)| {
        if band == swir_band {
            SWIR
        } else {
            SWIR * (1.0 - index[[row, col]])
        }
    });
    MultiBandImage::new(data)
}

/// Histogram bucket center for the default 200 buckets over [-0.5, 0.5].
/// Values placed on bucket centers never straddle a bucket edge.
pub fn center(bucket: usize) -> f32 {
    (-0.5 + (bucket as f64 + 0.5) * 0.005) as f32
}

/// Mask with `label` inside the half-open row/col ranges, 0 elsewhere.
pub fn rect_mask(
    h: usize,
    w: usize,
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
    label: u16,
) -> RegionMask {
    Array2::from_shape_fn((h, w), |(r, c)| {
        if rows.contains(&r) && cols.contains(&c) {
            label
        } else {
            0
        }
    })
}

/// `n` values spread deterministically over `center ± 0.004`.
pub fn cluster(center: f32, n: usize) -> Vec<f32> {
    const OFFSETS: [f32; 5] = [-0.004, -0.002, 0.0, 0.002, 0.004];
    (0..n).map(|i| center + OFFSETS[i % OFFSETS.len()]).collect()
}

pub fn mean(sample: &[f32]) -> f64 {
    sample.iter().map(|&v| v as f64).sum::<f64>() / sample.len() as f64
}
