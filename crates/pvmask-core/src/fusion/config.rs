use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CLEANUP_MAX_AREA, DEFAULT_RETENTION_RATIO};
use crate::error::{PvMaskError, Result};
use crate::threshold::ThresholdParams;

/// Small-region removal applied to the fused mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleanupConfig {
    #[serde(default = "default_cleanup_enabled")]
    pub enabled: bool,
    /// Regions with at most this many pixels are removed.
    #[serde(default = "default_max_area")]
    pub max_area: usize,
}

fn default_cleanup_enabled() -> bool {
    true
}
fn default_max_area() -> usize {
    DEFAULT_CLEANUP_MAX_AREA
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_area: DEFAULT_CLEANUP_MAX_AREA,
        }
    }
}

/// Full configuration of a single-site reconciliation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    #[serde(default)]
    pub threshold: ThresholdParams,
    /// Fraction of the prior mask a refinement must keep to replace it.
    /// `None` or `0.0` disables the guard.
    #[serde(default = "default_retention_ratio")]
    pub retention_ratio: Option<f64>,
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

fn default_retention_ratio() -> Option<f64> {
    Some(DEFAULT_RETENTION_RATIO)
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdParams::default(),
            retention_ratio: Some(DEFAULT_RETENTION_RATIO),
            cleanup: CleanupConfig::default(),
        }
    }
}

impl FusionConfig {
    pub fn validate(&self) -> Result<()> {
        self.threshold.validate()?;
        if let Some(ratio) = self.retention_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(PvMaskError::InvalidConfig(format!(
                    "retention ratio {ratio} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }
}
