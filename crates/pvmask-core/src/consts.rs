/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Stabilizer added to the SWIR denominator of the NDPI ratio.
pub const NDPI_EPSILON: f32 = 1e-10;

/// Band positions (from the start of the band axis) that compete with SWIR
/// in the NDPI maximum. For Sentinel-2 MSI these are B2, B3, B4 and B8.
pub const NDPI_LEADING_BANDS: [usize; 4] = [1, 2, 3, 7];

/// Offset from the end of the band axis of the SWIR band (B11).
pub const NDPI_SWIR_OFFSET_FROM_END: usize = 2;

/// Offset from the end of the band axis of the trailing competitor band (B12).
pub const NDPI_TRAILING_OFFSET_FROM_END: usize = 1;

/// Minimum band count so that every NDPI band reference resolves.
pub const NDPI_MIN_BANDS: usize = 8;

/// Default number of histogram buckets for valley detection.
pub const DEFAULT_HISTOGRAM_BINS: usize = 200;

/// Default lower edge of the histogram domain.
pub const DEFAULT_RANGE_MIN: f64 = -0.5;

/// Default upper edge of the histogram domain.
pub const DEFAULT_RANGE_MAX: f64 = 0.5;

/// Default minimum peak density.
pub const DEFAULT_PEAK_HEIGHT: f64 = 2.0;

/// Default minimum bucket separation between accepted peaks.
pub const DEFAULT_PEAK_DISTANCE: usize = 5;

/// Default minimum peak prominence.
pub const DEFAULT_PEAK_PROMINENCE: f64 = 0.5;

/// Peaks at or below this index value are ignored when selecting candidate peaks.
pub const DEFAULT_MIN_PEAK_THRESHOLD: f64 = 0.02;

/// Fraction of a prior mask that a refinement must retain to be accepted.
pub const DEFAULT_RETENTION_RATIO: f64 = 0.8;

/// Connected regions with at most this many pixels are removed by cleanup.
pub const DEFAULT_CLEANUP_MAX_AREA: usize = 5;

/// Divisor that converts quantized reflectance to [0, ~1] (Sentinel-2 L2A).
pub const DEFAULT_REFLECTANCE_SCALE: f32 = 10_000.0;
