use serde::{Deserialize, Serialize};

/// Joint constraints a local maximum must satisfy to count as a peak.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakCriteria {
    /// Minimum peak value.
    pub height: f64,
    /// Minimum index separation between accepted peaks.
    pub distance: usize,
    /// Minimum prominence.
    pub prominence: f64,
}

/// Find peaks in a 1D signal.
///
/// Stages, in order:
/// 1. local maxima: a sample higher than its left neighbor and higher than
///    the first differing sample to its right. A flat plateau yields a single
///    peak at its middle (rounded down). The first and last samples are
///    never peaks.
/// 2. keep peaks with value `>= height`.
/// 3. greedy distance suppression: starting from the highest peak, drop every
///    peak closer than `distance` samples to an already kept one.
/// 4. keep peaks with prominence `>= prominence`.
///
/// Returned indices are ascending.
pub fn find_peaks(values: &[f64], criteria: &PeakCriteria) -> Vec<usize> {
    let mut peaks = local_maxima(values);
    peaks.retain(|&p| values[p] >= criteria.height);
    let peaks = select_by_distance(values, &peaks, criteria.distance);
    let prominences = peak_prominences(values, &peaks);
    peaks
        .into_iter()
        .zip(prominences)
        .filter(|&(_, prom)| prom >= criteria.prominence)
        .map(|(p, _)| p)
        .collect()
}

/// Indices of local maxima, plateaus collapsed to their middle sample.
pub fn local_maxima(values: &[f64]) -> Vec<usize> {
    let n = values.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let last = n - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    maxima
}

/// Keep the highest peaks first, removing any lower peak within `distance`
/// samples of a kept one. Among equal heights the later peak wins.
fn select_by_distance(values: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    if distance <= 1 || peaks.len() < 2 {
        return peaks.to_vec();
    }

    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| values[peaks[a]].total_cmp(&values[peaks[b]]));

    let mut keep = vec![true; peaks.len()];
    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter(|&(_, kept)| kept)
        .map(|(&p, _)| p)
        .collect()
}

/// Prominence of each peak: how far the signal must descend from the summit
/// before reaching a higher sample (or the signal boundary) on the side
/// with the higher base.
///
/// Each side is walked outward while samples stay `<=` the summit, tracking
/// the lowest sample seen; the prominence is the summit minus the larger of
/// the two minima.
pub fn peak_prominences(values: &[f64], peaks: &[usize]) -> Vec<f64> {
    peaks
        .iter()
        .map(|&peak| {
            let summit = values[peak];

            let mut left_min = summit;
            for &v in values[..=peak].iter().rev() {
                if v > summit {
                    break;
                }
                left_min = left_min.min(v);
            }

            let mut right_min = summit;
            for &v in &values[peak..] {
                if v > summit {
                    break;
                }
                right_min = right_min.min(v);
            }

            summit - left_min.max(right_min)
        })
        .collect()
}
