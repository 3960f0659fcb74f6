use pvmask_core::consts::{
    DEFAULT_CLEANUP_MAX_AREA, DEFAULT_HISTOGRAM_BINS, DEFAULT_MIN_PEAK_THRESHOLD,
    DEFAULT_PEAK_DISTANCE, DEFAULT_RETENTION_RATIO,
};
use pvmask_core::fusion::{CleanupConfig, FusionConfig};
use pvmask_core::threshold::{PeakSelection, ThresholdParams};
use pvmask_core::PvMaskError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_threshold_params_defaults() {
    let p = ThresholdParams::default();
    assert_eq!(p.bins, 200);
    assert_eq!(p.range_min, -0.5);
    assert_eq!(p.range_max, 0.5);
    assert_eq!(p.height, 2.0);
    assert_eq!(p.distance, 5);
    assert_eq!(p.prominence, 0.5);
    assert_eq!(p.min_threshold, 0.02);
}

#[test]
fn test_fusion_config_defaults() {
    let c = FusionConfig::default();
    assert_eq!(c.retention_ratio, Some(DEFAULT_RETENTION_RATIO));
    assert!(c.cleanup.enabled);
    assert_eq!(c.cleanup.max_area, DEFAULT_CLEANUP_MAX_AREA);
    assert!(c.validate().is_ok());
}

#[test]
fn test_peak_selection_display() {
    assert_eq!(format!("{}", PeakSelection::Prior), "Prior");
    assert_eq!(format!("{}", PeakSelection::Candidate), "Candidate");
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[test]
fn test_empty_json_uses_defaults() {
    let c: FusionConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(c, FusionConfig::default());
}

#[test]
fn test_partial_threshold_json_fills_defaults() {
    let c: FusionConfig =
        serde_json::from_str(r#"{"threshold": {"bins": 100, "min_threshold": 0.05}}"#).unwrap();
    assert_eq!(c.threshold.bins, 100);
    assert_eq!(c.threshold.min_threshold, 0.05);
    assert_eq!(c.threshold.distance, DEFAULT_PEAK_DISTANCE);
    assert_eq!(c.retention_ratio, Some(DEFAULT_RETENTION_RATIO));
}

#[test]
fn test_null_ratio_disables_guard() {
    let c: FusionConfig = serde_json::from_str(r#"{"retention_ratio": null}"#).unwrap();
    assert_eq!(c.retention_ratio, None);
}

#[test]
fn test_config_json_roundtrip() {
    let c = FusionConfig {
        threshold: ThresholdParams {
            bins: 128,
            prominence: 0.25,
            ..ThresholdParams::default()
        },
        retention_ratio: Some(0.75),
        cleanup: CleanupConfig {
            enabled: false,
            max_area: 12,
        },
    };
    let json = serde_json::to_string(&c).unwrap();
    let back: FusionConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn test_peak_selection_serde_names() {
    let json = serde_json::to_string(&PeakSelection::Candidate).unwrap();
    assert_eq!(json, "\"Candidate\"");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn assert_invalid(config: FusionConfig) {
    assert!(
        matches!(config.validate(), Err(PvMaskError::InvalidConfig(_))),
        "expected invalid config: {config:?}"
    );
}

#[test]
fn test_validate_rejects_zero_bins() {
    let mut c = FusionConfig::default();
    c.threshold.bins = 0;
    assert_invalid(c);
}

#[test]
fn test_validate_rejects_inverted_range() {
    let mut c = FusionConfig::default();
    c.threshold.range_min = 0.5;
    c.threshold.range_max = -0.5;
    assert_invalid(c);
}

#[test]
fn test_validate_rejects_zero_distance() {
    let mut c = FusionConfig::default();
    c.threshold.distance = 0;
    assert_invalid(c);
}

#[test]
fn test_validate_rejects_ratio_out_of_range() {
    let mut c = FusionConfig::default();
    c.retention_ratio = Some(1.2);
    assert_invalid(c.clone());
    c.retention_ratio = Some(f64::NAN);
    assert_invalid(c);
}

#[test]
fn test_validate_accepts_disabled_guard() {
    let mut c = FusionConfig::default();
    c.retention_ratio = Some(0.0);
    assert!(c.validate().is_ok());
    c.retention_ratio = None;
    assert!(c.validate().is_ok());
}

#[test]
fn test_default_constants_are_consistent() {
    assert_eq!(ThresholdParams::default().bins, DEFAULT_HISTOGRAM_BINS);
    assert_eq!(
        ThresholdParams::default().min_threshold,
        DEFAULT_MIN_PEAK_THRESHOLD
    );
}
