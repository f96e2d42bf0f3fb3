use serde::{Deserialize, Serialize};

/// Tunable thresholds for velocity change-point segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Smoothed per-frame wrist displacement above this counts as moving
    pub velocity_threshold: f64,

    /// Debounce: frames that must pass since the last boundary before a state change opens a new one
    pub min_segment_frames: usize,

    /// Centered moving-average window applied to the raw velocity
    pub smoothing_window: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 0.02,
            min_segment_frames: 5,
            smoothing_window: 5,
        }
    }
}
