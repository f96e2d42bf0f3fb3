//! Calibration settings for the three analysis stages.
//!
//! Every threshold defaults to the reference calibration; a settings file
//! only needs to name the knobs it changes.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::labels::LabelingConfig;
use crate::metrics::MetricsConfig;
use crate::segmentation::SegmentationConfig;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub segmentation: SegmentationConfig,
    pub labeling: LabelingConfig,
    pub metrics: MetricsConfig,
}

impl AnalysisSettings {
    /// Load settings from `path`. A missing file means defaults; a file that
    /// does not parse is reported and replaced by defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!(
                    "ignoring unparseable settings in {}: {err}",
                    path.display()
                );
                AnalysisSettings::default()
            })
        } else {
            AnalysisSettings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    /// Reject values no stage can work with.
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segmentation;
        if !is_non_negative(seg.velocity_threshold) {
            bail!("Invalid velocity_threshold. Must be non-negative");
        }
        if seg.smoothing_window == 0 {
            bail!("Invalid smoothing_window. Must be at least 1");
        }

        let lab = &self.labeling;
        if !(is_non_negative(lab.wait_velocity_max) && is_non_negative(lab.move_velocity_min)) {
            bail!("Invalid labeling velocities. Must be non-negative");
        }
        if lab.wait_velocity_max > lab.move_velocity_min {
            bail!("Invalid labeling velocities. wait_velocity_max must not exceed move_velocity_min");
        }
        if !is_non_negative(lab.wait_min_duration_secs) {
            bail!("Invalid wait_min_duration_secs. Must be non-negative");
        }

        let met = &self.metrics;
        if met.tilt_normalization_divisor == 0 {
            bail!("Invalid tilt_normalization_divisor. Must be at least 1");
        }
        if !is_non_negative(met.tilt_delta_min) {
            bail!("Invalid tilt_delta_min. Must be non-negative");
        }
        if met.min_total_time_secs.is_nan() || met.min_total_time_secs <= 0.0 {
            bail!("Invalid min_total_time_secs. Must be positive");
        }

        Ok(())
    }
}

/// False for NaN as well as for negative values.
fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}
