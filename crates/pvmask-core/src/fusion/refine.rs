use tracing::{info, warn};

use crate::error::Result;
use crate::mask::{binarize, max_label, positive_count, restrict_to_roi, sample_roi, scale_to_label};
use crate::raster::{IndexMap, RegionMask};
use crate::threshold::{analyze_threshold, PeakSelection, ThresholdOutcome, ThresholdParams};

/// Verdict of the retention guard on a refined mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GuardDecision {
    /// No ratio was requested.
    NotApplied,
    /// The refinement kept at least the required fraction of the prior mask.
    Accepted { retained: f64 },
    /// The refinement shrank the prior mask too much and was discarded.
    Rejected { retained: f64 },
}

/// Result of re-thresholding the index inside one region of interest.
#[derive(Clone, Debug)]
pub struct Refinement {
    /// Refined mask, labelled with the ROI's maximum label; the ROI itself
    /// when the guard rejected the refinement.
    pub mask: RegionMask,
    pub threshold: ThresholdOutcome,
    pub guard: GuardDecision,
}

/// Compare the positive-pixel counts of `candidate` and `prior`.
///
/// An empty prior has nothing to protect and is always accepted.
pub fn apply_retention_guard(
    prior: &RegionMask,
    candidate: &RegionMask,
    ratio: Option<f64>,
) -> GuardDecision {
    let ratio = match ratio {
        Some(r) if r > 0.0 => r,
        _ => return GuardDecision::NotApplied,
    };

    let before = positive_count(prior);
    if before == 0 {
        return GuardDecision::Accepted { retained: 1.0 };
    }
    let retained = positive_count(candidate) as f64 / before as f64;
    if retained < ratio {
        GuardDecision::Rejected { retained }
    } else {
        GuardDecision::Accepted { retained }
    }
}

/// Threshold `index` using the histogram of the pixels inside `roi`, then
/// binarize the whole map and keep only the pixels inside `roi`.
pub fn refine_with_mask(
    index: &IndexMap,
    roi: &RegionMask,
    selection: PeakSelection,
    params: &ThresholdParams,
    ratio: Option<f64>,
) -> Result<Refinement> {
    let sample = sample_roi(index, roi)?;
    let threshold = analyze_threshold(&sample, selection, params);
    let refined = restrict_to_roi(&binarize(index, threshold.value), roi)?;

    let guard = apply_retention_guard(roi, &refined, ratio);
    info!(
        %selection,
        threshold = threshold.value,
        fallback = threshold.is_fallback(),
        roi_pixels = sample.len(),
        kept_pixels = positive_count(&refined),
        "Refined region"
    );

    let mask = match guard {
        GuardDecision::Rejected { retained } => {
            warn!(
                retained,
                ratio = ratio.unwrap_or_default(),
                "Refinement shrank the prior mask too much, keeping it unchanged"
            );
            roi.clone()
        }
        _ => scale_to_label(&refined, max_label(roi)),
    };

    Ok(Refinement {
        mask,
        threshold,
        guard,
    })
}
