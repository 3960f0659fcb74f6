use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{
    NDPI_EPSILON, NDPI_LEADING_BANDS, NDPI_MIN_BANDS, NDPI_SWIR_OFFSET_FROM_END,
    NDPI_TRAILING_OFFSET_FROM_END, PARALLEL_PIXEL_THRESHOLD,
};
use crate::error::{PvMaskError, Result};
use crate::raster::{IndexMap, MultiBandImage};

/// Band positions resolved against a concrete band count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NdpiBands {
    pub swir: usize,
    pub competitors: [usize; 5],
}

impl NdpiBands {
    /// Resolve the fixed NDPI band offsets for an image with `band_count` bands.
    pub fn resolve(band_count: usize) -> Result<Self> {
        if band_count < NDPI_MIN_BANDS {
            return Err(PvMaskError::BandCount {
                required: NDPI_MIN_BANDS,
                actual: band_count,
            });
        }
        let [b0, b1, b2, b3] = NDPI_LEADING_BANDS;
        Ok(Self {
            swir: band_count - NDPI_SWIR_OFFSET_FROM_END,
            competitors: [b0, b1, b2, b3, band_count - NDPI_TRAILING_OFFSET_FROM_END],
        })
    }
}

/// Compute the Normalized Difference PV Index of every pixel:
///
///   NDPI = (SWIR - max(B2, B3, B4, B8, B12)) / (SWIR + eps)
///
/// Surfaces whose SWIR reflectance dominates every visible/NIR band score
/// close to +1; vegetation, water and bare soil score low or negative.
pub fn compute_index(image: &MultiBandImage) -> Result<IndexMap> {
    let bands = NdpiBands::resolve(image.band_count())?;
    let (h, w) = image.dim();
    debug!(
        height = h,
        width = w,
        swir = bands.swir,
        competitors = ?bands.competitors,
        "Computing NDPI"
    );

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        Ok(compute_index_parallel(image, &bands, h, w))
    } else {
        Ok(compute_index_sequential(image, &bands, h, w))
    }
}

#[inline]
fn ndpi_at(image: &MultiBandImage, bands: &NdpiBands, row: usize, col: usize) -> f32 {
    let swir = image.data[[row, col, bands.swir]];
    let max_other = bands
        .competitors
        .iter()
        .map(|&b| image.data[[row, col, b]])
        .fold(f32::NEG_INFINITY, f32::max);
    (swir - max_other) / (swir + NDPI_EPSILON)
}

fn compute_index_sequential(
    image: &MultiBandImage,
    bands: &NdpiBands,
    h: usize,
    w: usize,
) -> IndexMap {
    Array2::from_shape_fn((h, w), |(row, col)| ndpi_at(image, bands, row, col))
}

/// Row-parallel variant using Rayon.
fn compute_index_parallel(
    image: &MultiBandImage,
    bands: &NdpiBands,
    h: usize,
    w: usize,
) -> IndexMap {
    let rows: Vec<Vec<f32>> = (0..h)
        .into_par_iter()
        .map(|row| (0..w).map(|col| ndpi_at(image, bands, row, col)).collect())
        .collect();

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, values) in rows.into_iter().enumerate() {
        for (col, val) in values.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_sentinel2_layout() {
        let bands = NdpiBands::resolve(13).unwrap();
        assert_eq!(bands.swir, 11);
        assert_eq!(bands.competitors, [1, 2, 3, 7, 12]);
    }

    #[test]
    fn resolves_minimum_layout() {
        let bands = NdpiBands::resolve(NDPI_MIN_BANDS).unwrap();
        assert_eq!(bands.swir, 6);
        assert_eq!(bands.competitors[4], 7);
    }

    #[test]
    fn rejects_too_few_bands() {
        let err = NdpiBands::resolve(4).unwrap_err();
        assert!(matches!(
            err,
            PvMaskError::BandCount {
                required: NDPI_MIN_BANDS,
                actual: 4
            }
        ));
    }
}
