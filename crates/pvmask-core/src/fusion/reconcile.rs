use tracing::info;

use crate::error::{ensure_same_shape, Result};
use crate::mask::{difference, positive_count, remove_small_areas, union};
use crate::raster::{MultiBandImage, RegionMask};
use crate::spectral::compute_index;
use crate::threshold::PeakSelection;

use super::config::FusionConfig;
use super::refine::{refine_with_mask, Refinement};

/// Which branch of the reconciliation policy ran, with its intermediate masks.
#[derive(Clone, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum FusionPath {
    /// No prior mask: the new mask was refined on its own.
    Fresh { new: Refinement },
    /// A prior mask exists: it was refined (under the retention guard) and
    /// the pixels only present in the new mask were refined separately.
    WithPrior {
        old: Refinement,
        diff_mask: RegionMask,
        diff: Refinement,
    },
}

/// Outcome of one reconciliation run.
#[derive(Clone, Debug)]
pub struct FusionReport {
    pub path: FusionPath,
    pub final_mask: RegionMask,
    /// True when small-area cleanup ran on `final_mask`.
    pub cleaned: bool,
}

impl FusionReport {
    pub fn positive_pixels(&self) -> usize {
        positive_count(&self.final_mask)
    }
}

/// Reconcile a prior mask with a new one using default threshold parameters.
///
/// `ratio` is the retention guard applied when refining `old_mask`; `None`
/// disables it. No cleanup is applied.
pub fn reconcile(
    image: &MultiBandImage,
    old_mask: Option<&RegionMask>,
    new_mask: &RegionMask,
    ratio: Option<f64>,
) -> Result<RegionMask> {
    let config = FusionConfig {
        retention_ratio: ratio,
        ..FusionConfig::default()
    };
    Ok(reconcile_with(image, old_mask, new_mask, &config)?.final_mask)
}

/// Reconcile a prior mask with a new one and report every intermediate step.
///
/// Without a prior mask the new mask is refined in candidate mode. With one,
/// the prior mask is refined in prior mode under the retention guard, the
/// pixels present only in the new mask are refined in candidate mode, and
/// the two results are united. Cleanup settings are ignored here; see
/// [`process_site`].
pub fn reconcile_with(
    image: &MultiBandImage,
    old_mask: Option<&RegionMask>,
    new_mask: &RegionMask,
    config: &FusionConfig,
) -> Result<FusionReport> {
    config.validate()?;
    ensure_same_shape("new mask", image.dim(), new_mask.dim())?;
    if let Some(old) = old_mask {
        ensure_same_shape("old mask", image.dim(), old.dim())?;
    }

    let index = compute_index(image)?;
    let params = &config.threshold;

    let (path, final_mask) = match old_mask {
        None => {
            info!("No prior mask, refining new mask");
            let new = refine_with_mask(&index, new_mask, PeakSelection::Candidate, params, None)?;
            let final_mask = new.mask.clone();
            (FusionPath::Fresh { new }, final_mask)
        }
        Some(old_mask) => {
            info!("Prior mask found, fusing with new mask");
            let old = refine_with_mask(
                &index,
                old_mask,
                PeakSelection::Prior,
                params,
                config.retention_ratio,
            )?;
            let diff_mask = difference(old_mask, new_mask)?;
            let diff = refine_with_mask(&index, &diff_mask, PeakSelection::Candidate, params, None)?;
            let final_mask = union(&old.mask, &diff.mask)?;
            (
                FusionPath::WithPrior {
                    old,
                    diff_mask,
                    diff,
                },
                final_mask,
            )
        }
    };

    info!(positive_pixels = positive_count(&final_mask), "Reconciliation complete");
    Ok(FusionReport {
        path,
        final_mask,
        cleaned: false,
    })
}

/// Reconcile one site and apply the configured small-area cleanup.
pub fn process_site(
    image: &MultiBandImage,
    old_mask: Option<&RegionMask>,
    new_mask: &RegionMask,
    config: &FusionConfig,
) -> Result<FusionReport> {
    let mut report = reconcile_with(image, old_mask, new_mask, config)?;
    if config.cleanup.enabled {
        report.final_mask = remove_small_areas(&report.final_mask, config.cleanup.max_area);
        report.cleaned = true;
    }
    Ok(report)
}
