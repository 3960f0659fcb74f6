pub mod config;
pub mod histogram;
pub mod peaks;
pub mod valley;

pub use config::{PeakSelection, ThresholdParams};
pub use histogram::Histogram;
pub use peaks::{find_peaks, peak_prominences, PeakCriteria};
pub use valley::{analyze_threshold, find_threshold, ThresholdKind, ThresholdOutcome};
