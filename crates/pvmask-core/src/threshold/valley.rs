use tracing::{debug, warn};

use super::config::{PeakSelection, ThresholdParams};
use super::histogram::Histogram;
use super::peaks::find_peaks;

/// How a threshold was obtained.
#[derive(Clone, Debug, PartialEq)]
pub enum ThresholdKind {
    /// Minimum-density bucket between two histogram peaks.
    Valley {
        lower_peak: usize,
        upper_peak: usize,
        bucket: usize,
    },
    /// Too few usable peaks; the sample mean was substituted.
    Fallback { peaks_found: usize },
}

/// A binarization threshold together with its provenance.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdOutcome {
    pub value: f64,
    pub kind: ThresholdKind,
}

impl ThresholdOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.kind, ThresholdKind::Fallback { .. })
    }
}

/// Choose a binarization threshold for `sample` from the valley of its
/// density histogram. Never fails: when no suitable peak pair exists the
/// sample mean is returned.
pub fn find_threshold(sample: &[f32], selection: PeakSelection, params: &ThresholdParams) -> f64 {
    analyze_threshold(sample, selection, params).value
}

/// Same as [`find_threshold`], also reporting whether the mean fallback was used.
pub fn analyze_threshold(
    sample: &[f32],
    selection: PeakSelection,
    params: &ThresholdParams,
) -> ThresholdOutcome {
    let hist = Histogram::density(sample, params.bins, (params.range_min, params.range_max));
    let centers = hist.centers();

    let mut peaks = find_peaks(hist.densities(), &params.peak_criteria());
    peaks.sort_by(|&a, &b| centers[a].total_cmp(&centers[b]));
    debug!(
        samples = sample.len(),
        peaks = ?peaks.iter().map(|&p| centers[p]).collect::<Vec<_>>(),
        %selection,
        "Histogram peaks"
    );

    let Some((lower_peak, upper_peak)) = select_peak_pair(&peaks, centers, selection, params)
    else {
        let value = sample_mean(sample);
        warn!(
            peaks_found = peaks.len(),
            %selection,
            threshold = value,
            "No usable peak pair, falling back to sample mean"
        );
        return ThresholdOutcome {
            value,
            kind: ThresholdKind::Fallback {
                peaks_found: peaks.len(),
            },
        };
    };

    let bucket = valley_bucket(hist.densities(), lower_peak, upper_peak);
    ThresholdOutcome {
        value: centers[bucket],
        kind: ThresholdKind::Valley {
            lower_peak,
            upper_peak,
            bucket,
        },
    }
}

/// Pick the two peaks bounding the valley. `peaks` must be sorted by bin center.
pub fn select_peak_pair(
    peaks: &[usize],
    centers: &[f64],
    selection: PeakSelection,
    params: &ThresholdParams,
) -> Option<(usize, usize)> {
    match selection {
        PeakSelection::Prior => match peaks {
            [.., lo, hi] => Some((*lo, *hi)),
            _ => None,
        },
        PeakSelection::Candidate => {
            let kept: Vec<usize> = peaks
                .iter()
                .copied()
                .filter(|&p| centers[p] > params.min_threshold)
                .collect();
            match kept.as_slice() {
                [lo, hi] => Some((*lo, *hi)),
                // The topmost peak is skipped as a likely saturation artifact.
                [.., lo, hi, _] => Some((*lo, *hi)),
                _ => None,
            }
        }
    }
}

/// Bucket of minimum density strictly between two peaks, first one on ties.
/// Adjacent peaks leave nothing in between; the lower peak's bucket is used.
fn valley_bucket(densities: &[f64], lower_peak: usize, upper_peak: usize) -> usize {
    let start = lower_peak + 1;
    if start >= upper_peak {
        return lower_peak;
    }
    let mut best = start;
    for i in start + 1..upper_peak {
        if densities[i] < densities[best] {
            best = i;
        }
    }
    best
}

/// Arithmetic mean of the sample. An empty sample yields `+inf`, so that
/// binarizing with it selects nothing.
fn sample_mean(sample: &[f32]) -> f64 {
    if sample.is_empty() {
        return f64::INFINITY;
    }
    sample.iter().map(|&v| v as f64).sum::<f64>() / sample.len() as f64
}
