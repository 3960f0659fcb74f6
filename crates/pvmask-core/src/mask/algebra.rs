//! Boolean set operations on label masks.
//!
//! Each result is a binary mask rescaled to a label taken from one of the
//! inputs: the first mask's maximum for intersection and union, the second
//! mask's maximum for difference. Downstream consumers key off these label
//! values, so the asymmetry is part of the contract.

use ndarray::Zip;

use crate::error::{ensure_same_shape, Result};
use crate::raster::RegionMask;

/// Largest label in the mask, 0 for an all-background mask.
pub fn max_label(mask: &RegionMask) -> u16 {
    mask.iter().copied().max().unwrap_or(0)
}

/// Number of nonzero pixels.
pub fn positive_count(mask: &RegionMask) -> usize {
    mask.iter().filter(|&&v| v > 0).count()
}

/// Set every nonzero pixel to `label`.
pub fn scale_to_label(mask: &RegionMask, label: u16) -> RegionMask {
    mask.mapv(|v| if v > 0 { label } else { 0 })
}

/// Pixels nonzero in both masks, labelled with `max(m1)`.
pub fn intersection(m1: &RegionMask, m2: &RegionMask) -> Result<RegionMask> {
    combine("mask intersection", m1, m2, max_label(m1), |a, b| a && b)
}

/// Pixels nonzero in either mask, labelled with `max(m1)`.
pub fn union(m1: &RegionMask, m2: &RegionMask) -> Result<RegionMask> {
    combine("mask union", m1, m2, max_label(m1), |a, b| a || b)
}

/// Pixels nonzero in `m2` but not in `m1`, labelled with `max(m2)`.
pub fn difference(m1: &RegionMask, m2: &RegionMask) -> Result<RegionMask> {
    combine("mask difference", m1, m2, max_label(m2), |a, b| b && !a)
}

fn combine(
    context: &'static str,
    m1: &RegionMask,
    m2: &RegionMask,
    label: u16,
    op: impl Fn(bool, bool) -> bool,
) -> Result<RegionMask> {
    ensure_same_shape(context, m1.dim(), m2.dim())?;
    Ok(Zip::from(m1)
        .and(m2)
        .map_collect(|&a, &b| if op(a > 0, b > 0) { label } else { 0 }))
}
