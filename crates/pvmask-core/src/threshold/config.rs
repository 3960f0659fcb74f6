use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_HISTOGRAM_BINS, DEFAULT_MIN_PEAK_THRESHOLD, DEFAULT_PEAK_DISTANCE,
    DEFAULT_PEAK_HEIGHT, DEFAULT_PEAK_PROMINENCE, DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN,
};
use crate::error::{PvMaskError, Result};

use super::peaks::PeakCriteria;

/// Strategy used to pick the pair of histogram peaks that bound the valley.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeakSelection {
    /// Re-threshold a previously confirmed mask ("old" mode): the two
    /// highest-valued peaks bound the valley.
    Prior,
    /// Discover new detections ("new" mode): peaks at or below the minimum
    /// threshold are dropped, and with more than two survivors the topmost
    /// peak is skipped.
    Candidate,
}

impl std::fmt::Display for PeakSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prior => write!(f, "Prior"),
            Self::Candidate => write!(f, "Candidate"),
        }
    }
}

impl FromStr for PeakSelection {
    type Err = PvMaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" | "prior" => Ok(Self::Prior),
            "new" | "candidate" => Ok(Self::Candidate),
            _ => Err(PvMaskError::UnknownSelection(s.to_string())),
        }
    }
}

/// Histogram and peak-detection parameters for valley thresholding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Number of equal-width histogram buckets.
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// Lower edge of the histogram domain.
    #[serde(default = "default_range_min")]
    pub range_min: f64,
    /// Upper edge of the histogram domain.
    #[serde(default = "default_range_max")]
    pub range_max: f64,
    /// Minimum density of a peak.
    #[serde(default = "default_height")]
    pub height: f64,
    /// Minimum bucket distance between accepted peaks.
    #[serde(default = "default_distance")]
    pub distance: usize,
    /// Minimum prominence of a peak.
    #[serde(default = "default_prominence")]
    pub prominence: f64,
    /// Candidate selection ignores peaks whose center is `<=` this value.
    #[serde(default = "default_min_threshold")]
    pub min_threshold: f64,
}

fn default_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}
fn default_range_min() -> f64 {
    DEFAULT_RANGE_MIN
}
fn default_range_max() -> f64 {
    DEFAULT_RANGE_MAX
}
fn default_height() -> f64 {
    DEFAULT_PEAK_HEIGHT
}
fn default_distance() -> usize {
    DEFAULT_PEAK_DISTANCE
}
fn default_prominence() -> f64 {
    DEFAULT_PEAK_PROMINENCE
}
fn default_min_threshold() -> f64 {
    DEFAULT_MIN_PEAK_THRESHOLD
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            bins: DEFAULT_HISTOGRAM_BINS,
            range_min: DEFAULT_RANGE_MIN,
            range_max: DEFAULT_RANGE_MAX,
            height: DEFAULT_PEAK_HEIGHT,
            distance: DEFAULT_PEAK_DISTANCE,
            prominence: DEFAULT_PEAK_PROMINENCE,
            min_threshold: DEFAULT_MIN_PEAK_THRESHOLD,
        }
    }
}

impl ThresholdParams {
    pub fn peak_criteria(&self) -> PeakCriteria {
        PeakCriteria {
            height: self.height,
            distance: self.distance,
            prominence: self.prominence,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 {
            return Err(PvMaskError::InvalidConfig(
                "histogram needs at least one bin".into(),
            ));
        }
        if !(self.range_min < self.range_max) {
            return Err(PvMaskError::InvalidConfig(format!(
                "histogram range [{}, {}] is empty",
                self.range_min, self.range_max
            )));
        }
        if self.distance < 1 {
            return Err(PvMaskError::InvalidConfig(
                "peak distance must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
