use ndarray::Zip;

use crate::error::{ensure_same_shape, Result};
use crate::raster::{IndexMap, RegionMask};

/// Binary segmentation: 1 where `index >= threshold`, 0 elsewhere (NaN included).
pub fn binarize(index: &IndexMap, threshold: f64) -> RegionMask {
    index.mapv(|v| u16::from(v as f64 >= threshold))
}

/// Zero every pixel of `mask` that lies outside the nonzero area of `roi`.
pub fn restrict_to_roi(mask: &RegionMask, roi: &RegionMask) -> Result<RegionMask> {
    ensure_same_shape("ROI restriction", roi.dim(), mask.dim())?;
    let mut out = mask.clone();
    Zip::from(&mut out).and(roi).for_each(|m, &r| {
        if r == 0 {
            *m = 0;
        }
    });
    Ok(out)
}

/// Index values of the pixels inside the nonzero area of `roi`, row-major.
pub fn sample_roi(index: &IndexMap, roi: &RegionMask) -> Result<Vec<f32>> {
    ensure_same_shape("ROI sampling", index.dim(), roi.dim())?;
    Ok(index
        .iter()
        .zip(roi.iter())
        .filter(|&(_, &r)| r > 0)
        .map(|(&v, _)| v)
        .collect())
}
