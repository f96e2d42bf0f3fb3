use serde::{Deserialize, Serialize};

/// Calibration knobs of the KPI computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Frame-to-frame wrist y change above this counts toward `tilt_actions`
    pub tilt_delta_min: f64,

    /// Raw tilt count is integer-divided by this. Coarse normalization, not a
    /// physical unit; a candidate for recalibration.
    pub tilt_normalization_divisor: u64,

    /// Floor applied to the total time whenever it is used as a divisor
    pub min_total_time_secs: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            tilt_delta_min: 0.03,
            tilt_normalization_divisor: 10,
            min_total_time_secs: 0.01,
        }
    }
}
