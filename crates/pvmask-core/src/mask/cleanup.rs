use std::collections::{BTreeSet, HashSet};

use ndarray::Zip;
use tracing::debug;

use crate::raster::RegionMask;

use super::components::connected_components_8;

/// Remove 8-connected regions of at most `max_area` pixels, label by label.
///
/// Each distinct nonzero label is treated as its own binary mask, so two
/// touching regions with different labels are judged separately.
pub fn remove_small_areas(mask: &RegionMask, max_area: usize) -> RegionMask {
    let mut cleaned = mask.clone();
    let label_values: BTreeSet<u16> = mask.iter().copied().filter(|&v| v > 0).collect();

    let mut removed = 0usize;
    for value in label_values {
        let binary = mask.mapv(|v| v == value);
        let components = connected_components_8(&binary);
        let small: HashSet<u32> = components
            .stats
            .iter()
            .filter(|c| c.area <= max_area)
            .map(|c| c.label)
            .collect();
        if small.is_empty() {
            continue;
        }
        removed += small.len();

        Zip::from(&mut cleaned)
            .and(&components.labels)
            .for_each(|px, &lbl| {
                if lbl > 0 && small.contains(&lbl) {
                    *px = 0;
                }
            });
    }

    debug!(removed, max_area, "Removed small regions");
    cleaned
}
