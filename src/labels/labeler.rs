use crate::geometry::{mean_step, round_to};
use crate::labels::config::LabelingConfig;
use crate::models::{Frame, Label, MotionLabel, ProcessTemplate, Segment};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Assign one Therblig label per segment, preserving segment order.
///
/// The template's expected flow supplies the nominal label; measured wrist
/// speed then overrides it when the motion clearly says otherwise.
pub fn label_segments(
    segments: &[Segment],
    frames: &[Frame],
    template: &ProcessTemplate,
    config: &LabelingConfig,
) -> Vec<Label> {
    segments
        .iter()
        .enumerate()
        .map(|(segment_id, segment)| {
            let nominal = nominal_label(segment_id, segment, template, config);
            let avg_velocity = average_wrist_velocity(frames, segment);
            let label = apply_velocity_override(nominal, avg_velocity, segment, config);

            Label {
                segment_id,
                start_frame: segment.start_frame,
                end_frame: segment.end_frame,
                start_sec: segment.start_sec,
                end_sec: segment.end_sec,
                label_description: label.description().to_string(),
                is_non_value_added: label.is_non_value_added(),
                label,
                duration_sec: round_to(segment.duration_sec, 2),
                avg_velocity: round_to(avg_velocity, 4),
            }
        })
        .collect()
}

/// Mean displacement between consecutive detected wrist positions within the segment.
///
/// Frames without a wrist landmark are skipped; fewer than two detections give 0.
pub fn average_wrist_velocity(frames: &[Frame], segment: &Segment) -> f64 {
    let positions: Vec<_> = frames
        .iter()
        .skip(segment.start_frame)
        .take(segment.frame_count())
        .filter_map(Frame::wrist)
        .collect();

    mean_step(&positions)
}

/// Expected-flow position cycles with the segment index; no flow falls back to a length check.
fn nominal_label(
    segment_id: usize,
    segment: &Segment,
    template: &ProcessTemplate,
    config: &LabelingConfig,
) -> MotionLabel {
    let flow = &template.expected_flow;
    if !flow.is_empty() {
        return flow[segment_id % flow.len()].clone();
    }

    if segment.frame_count() < config.short_segment_frames {
        MotionLabel::Wait
    } else {
        MotionLabel::UseTool
    }
}

fn apply_velocity_override(
    nominal: MotionLabel,
    avg_velocity: f64,
    segment: &Segment,
    config: &LabelingConfig,
) -> MotionLabel {
    let overridden = if avg_velocity < config.wait_velocity_max
        && segment.duration_sec > config.wait_min_duration_secs
    {
        MotionLabel::Wait
    } else if avg_velocity > config.move_velocity_min {
        MotionLabel::Move
    } else {
        return nominal;
    };

    if overridden != nominal {
        log_debug!(
            "labeling: frames {}..={} nominal {} overridden to {} (avg velocity {:.4})",
            segment.start_frame,
            segment.end_frame,
            nominal,
            overridden,
            avg_velocity
        );
    }
    overridden
}
