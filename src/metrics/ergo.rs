//! Posture risk from planar joint angles.

use crate::geometry::{angle_at_vertex, round_to};
use crate::metrics::types::ErgoSummary;
use crate::models::{landmark, ErgoThresholds, Frame};

/// Trunk and shoulder angles of one frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles {
    /// At the hip, between shoulder and knee; 180 is upright.
    pub trunk: f64,
    /// At the shoulder, between elbow and hip.
    pub shoulder: f64,
}

/// Angles for a frame carrying every landmark they reference, else `None`.
pub fn joint_angles(frame: &Frame) -> Option<JointAngles> {
    let shoulder = frame.landmark(landmark::LEFT_SHOULDER)?.position();
    let elbow = frame.landmark(landmark::LEFT_ELBOW)?.position();
    let hip = frame.landmark(landmark::LEFT_HIP)?.position();
    let knee = frame.landmark(landmark::LEFT_KNEE)?.position();

    Some(JointAngles {
        trunk: angle_at_vertex(shoulder, hip, knee),
        shoulder: angle_at_vertex(elbow, shoulder, hip),
    })
}

/// Share of assessable frames in trunk flexion and in shoulder elevation.
pub fn assess_ergonomics(frames: &[Frame], thresholds: &ErgoThresholds) -> ErgoSummary {
    let mut valid_frames = 0usize;
    let mut trunk_risk_frames = 0usize;
    let mut shoulder_risk_frames = 0usize;

    for angles in frames.iter().filter_map(joint_angles) {
        valid_frames += 1;
        if (180.0 - angles.trunk).abs() > thresholds.trunk_deg_gt {
            trunk_risk_frames += 1;
        }
        if angles.shoulder > thresholds.shoulder_deg_gt {
            shoulder_risk_frames += 1;
        }
    }

    let denominator = valid_frames.max(1) as f64;
    ErgoSummary {
        trunk_risk_ratio: round_to(trunk_risk_frames as f64 / denominator, 3),
        shoulder_risk_ratio: round_to(shoulder_risk_frames as f64 / denominator, 3),
        trunk_threshold_deg: thresholds.trunk_deg_gt,
        shoulder_threshold_deg: thresholds.shoulder_deg_gt,
        valid_frames,
    }
}
