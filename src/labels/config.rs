use serde::{Deserialize, Serialize};

/// Velocity heuristics that veto the template's nominal label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Average wrist speed below this (over a long enough segment) forces WAIT
    pub wait_velocity_max: f64,

    /// Segment must last longer than this for the WAIT override to apply
    pub wait_min_duration_secs: f64,

    /// Average wrist speed above this forces MOVE
    pub move_velocity_min: f64,

    /// Without an expected flow, segments with fewer frames than this are WAIT
    pub short_segment_frames: usize,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            wait_velocity_max: 0.005,
            wait_min_duration_secs: 1.0,
            move_velocity_min: 0.08,
            short_segment_frames: 3,
        }
    }
}
