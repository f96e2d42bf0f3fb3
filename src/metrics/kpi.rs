//! Count and path-length KPIs over the frame stream and the label sequence.

use crate::geometry::path_length;
use crate::metrics::config::MetricsConfig;
use crate::models::{Frame, Label, MotionLabel};

/// KPI names published in `MetricsReport::kpi`.
pub mod names {
    pub const CYCLE_TIME: &str = "cycle_time";
    pub const INSPECT_RATIO: &str = "inspect_ratio";
    pub const WALKING_RATIO: &str = "walking_ratio";
    pub const WAITING_RATIO: &str = "waiting_ratio";
    pub const SEARCH_RATIO: &str = "search_ratio";
    pub const STATIC_POSTURE_RATIO: &str = "static_posture_ratio";
    pub const HOLD_RATIO: &str = "hold_ratio";
    pub const NVA_RATIO: &str = "nva_ratio";
    pub const HAND_TRAVEL: &str = "hand_travel";
    pub const ORIENTATION_CHANGES: &str = "orientation_changes";
    pub const RECHECK_LOOPS: &str = "recheck_loops";
    pub const REGRASP_COUNT: &str = "regrasp_count";
    pub const TOOL_SWITCH_COUNT: &str = "tool_switch_count";
    pub const CARRY_COUNT: &str = "carry_count";
    pub const TILT_ACTIONS: &str = "tilt_actions";
    pub const ROUNDTRIP_COUNT: &str = "roundtrip_count";
    pub const OVERLAP_RATIO: &str = "overlap_ratio";
    pub const TRUNK_RISK_RATIO: &str = "trunk_risk_ratio";
    pub const SHOULDER_RISK_RATIO: &str = "shoulder_risk_ratio";
}

/// Wrist path length over the whole stream. Frames without a wrist are
/// skipped and the path bridges the gap.
pub fn hand_travel(frames: &[Frame]) -> f64 {
    let positions: Vec<_> = frames.iter().filter_map(Frame::wrist).collect();
    path_length(&positions)
}

/// Sign reversals of the frame-to-frame wrist x velocity.
///
/// Only pairs of consecutive frames that both carry a wrist contribute; a
/// zero step resets the comparison.
pub fn orientation_changes(frames: &[Frame]) -> u64 {
    let mut changes = 0;
    let mut previous_dx = 0.0;

    for pair in frames.windows(2) {
        if let (Some(prev), Some(curr)) = (pair[0].wrist(), pair[1].wrist()) {
            let dx = curr.x - prev.x;
            if previous_dx * dx < 0.0 {
                changes += 1;
            }
            previous_dx = dx;
        }
    }

    changes
}

/// Large vertical wrist jumps, integer-divided by the normalization divisor.
pub fn tilt_actions(frames: &[Frame], config: &MetricsConfig) -> u64 {
    let raw = frames
        .windows(2)
        .filter_map(|pair| Some((pair[0].wrist()?, pair[1].wrist()?)))
        .filter(|(prev, curr)| (curr.y - prev.y).abs() > config.tilt_delta_min)
        .count() as u64;

    raw / config.tilt_normalization_divisor.max(1)
}

/// `INSPECT, x, INSPECT` with `x != INSPECT`: re-inspection after an interruption.
pub fn recheck_loops(labels: &[Label]) -> u64 {
    count_triples(labels, |a, b, c| {
        *a == MotionLabel::Inspect && *b != MotionLabel::Inspect && *c == MotionLabel::Inspect
    })
}

/// `GET, PUT, GET`: the part was put down and grasped again.
pub fn regrasp_count(labels: &[Label]) -> u64 {
    count_triples(labels, |a, b, c| {
        *a == MotionLabel::Get && *b == MotionLabel::Put && *c == MotionLabel::Get
    })
}

/// Adjacent label changes across the whole sequence.
pub fn tool_switch_count(labels: &[Label]) -> u64 {
    labels
        .windows(2)
        .filter(|pair| pair[0].label != pair[1].label)
        .count() as u64
}

pub fn carry_count(labels: &[Label]) -> u64 {
    labels
        .iter()
        .filter(|label| label.label == MotionLabel::Move)
        .count() as u64
}

fn count_triples<F>(labels: &[Label], matches: F) -> u64
where
    F: Fn(&MotionLabel, &MotionLabel, &MotionLabel) -> bool,
{
    labels
        .windows(3)
        .filter(|w| matches(&w[0].label, &w[1].label, &w[2].label))
        .count() as u64
}
