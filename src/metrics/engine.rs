use std::collections::BTreeMap;

use anyhow::Result;

use crate::geometry::round_to;
use crate::metrics::config::MetricsConfig;
use crate::metrics::ergo::assess_ergonomics;
use crate::metrics::kpi::{self as counters, names};
use crate::metrics::types::{KpiSet, MetricsReport};
use crate::metrics::waste::evaluate_waste_patterns;
use crate::models::{stream_fps, Frame, Label, MotionLabel, ProcessTemplate, Segment};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Aggregate frames and labels into KPIs, posture risk and fired waste rules.
///
/// Every KPI reads frame or label data only; waste rules are evaluated last,
/// against the finished KPI map.
pub fn compute_metrics(
    frames: &[Frame],
    segments: &[Segment],
    labels: &[Label],
    template: &ProcessTemplate,
    config: &MetricsConfig,
) -> Result<MetricsReport> {
    if segments.len() != labels.len() {
        log_warn!(
            "metrics: {} labels for {} segments; label-based KPIs follow the labels",
            labels.len(),
            segments.len()
        );
    }

    let total_frames = frames.len();
    let fps = stream_fps(frames)?;
    // A single frame spans no time
    let total_time_sec = if total_frames <= 1 {
        0.0
    } else {
        total_frames as f64 / fps
    };
    let divisor = total_time_sec.max(config.min_total_time_secs);
    let ratio = |seconds: f64| round_to(seconds / divisor, 3);

    // Time per label and non-value-added time, from unrounded frame counts so
    // the per-label sums never exceed the stream time
    let mut label_times: BTreeMap<String, f64> = BTreeMap::new();
    let mut nva_time = 0.0;
    for label in labels {
        let seconds = covered_seconds(label, total_frames, fps);
        *label_times.entry(label.label.code().to_string()).or_insert(0.0) += seconds;
        if label.is_non_value_added {
            nva_time += seconds;
        }
    }
    let time_of = |label: MotionLabel| label_times.get(label.code()).copied().unwrap_or(0.0);

    let mut kpi = KpiSet::new();
    kpi.insert_ratio(names::CYCLE_TIME, round_to(total_time_sec, 2));

    kpi.insert_ratio(names::INSPECT_RATIO, ratio(time_of(MotionLabel::Inspect)));
    kpi.insert_ratio(names::WALKING_RATIO, ratio(time_of(MotionLabel::Move)));
    kpi.insert_ratio(names::WAITING_RATIO, ratio(time_of(MotionLabel::Wait)));
    kpi.insert_ratio(names::SEARCH_RATIO, ratio(time_of(MotionLabel::Search)));
    let static_posture = ratio(time_of(MotionLabel::Hold));
    kpi.insert_ratio(names::STATIC_POSTURE_RATIO, static_posture);
    kpi.insert_ratio(names::HOLD_RATIO, static_posture);
    kpi.insert_ratio(names::NVA_RATIO, ratio(nva_time));

    kpi.insert_ratio(names::HAND_TRAVEL, round_to(counters::hand_travel(frames), 3));
    kpi.insert_count(names::ORIENTATION_CHANGES, counters::orientation_changes(frames));
    kpi.insert_count(names::TILT_ACTIONS, counters::tilt_actions(frames, config));

    kpi.insert_count(names::RECHECK_LOOPS, counters::recheck_loops(labels));
    kpi.insert_count(names::REGRASP_COUNT, counters::regrasp_count(labels));
    kpi.insert_count(names::TOOL_SWITCH_COUNT, counters::tool_switch_count(labels));
    kpi.insert_count(names::CARRY_COUNT, counters::carry_count(labels));

    // Zone and multi-worker analysis are not part of this version
    kpi.insert_count(names::ROUNDTRIP_COUNT, 0);
    kpi.insert_ratio(names::OVERLAP_RATIO, 0.0);

    let ergo = assess_ergonomics(frames, &template.ergo_thresholds);
    kpi.insert_ratio(names::TRUNK_RISK_RATIO, ergo.trunk_risk_ratio);
    kpi.insert_ratio(names::SHOULDER_RISK_RATIO, ergo.shoulder_risk_ratio);

    let waste_fired = evaluate_waste_patterns(&template.waste_patterns, &kpi);


    Ok(MetricsReport {
        kpi,
        ergo,
        waste_fired,
        label_distribution: label_times,
        total_time_sec,
        total_frames,
    })
}

/// Seconds of stream covered by the label's frame range, clipped to the stream.
fn covered_seconds(label: &Label, total_frames: usize, fps: f64) -> f64 {
    if total_frames <= 1 {
        return 0.0;
    }
    let end_frame = label.end_frame.min(total_frames - 1);
    if end_frame < label.start_frame {
        return 0.0;
    }
    (end_frame + 1 - label.start_frame) as f64 / fps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{landmark, Comparator, Landmark, Trigger, WastePattern};

    const FPS: f64 = 30.0;

    fn frame_at(index: usize, x: f64) -> Frame {
        let mut landmarks = vec![Landmark::new(0.5, 0.5); 33];
        landmarks[landmark::RIGHT_WRIST] = Landmark::new(x, 0.5);
        Frame::new(index, FPS, landmarks)
    }

    fn label(segment_id: usize, start: usize, end: usize, code: &str) -> Label {
        let segment = Segment::from_frames(start, end, FPS);
        let label = MotionLabel::from_code(code);
        Label {
            segment_id,
            start_frame: start,
            end_frame: end,
            start_sec: segment.start_sec,
            end_sec: segment.end_sec,
            label_description: label.description().to_string(),
            is_non_value_added: label.is_non_value_added(),
            label,
            duration_sec: segment.duration_sec,
            avg_velocity: 0.0,
        }
    }

    fn segments_of(labels: &[Label]) -> Vec<Segment> {
        labels
            .iter()
            .map(|l| Segment::from_frames(l.start_frame, l.end_frame, FPS))
            .collect()
    }

    #[test]
    fn label_time_ratios() {
        let frames: Vec<_> = (0..300).map(|i| frame_at(i, 0.5)).collect();
        let labels = vec![
            label(0, 0, 89, "WAIT"),
            label(1, 90, 149, "INSPECT"),
            label(2, 150, 209, "MOVE"),
            label(3, 210, 239, "HOLD"),
            label(4, 240, 269, "SEARCH"),
            label(5, 270, 299, "GET"),
        ];
        let report = compute_metrics(
            &frames,
            &segments_of(&labels),
            &labels,
            &ProcessTemplate::default(),
            &MetricsConfig::default(),
        )
        .unwrap();

        let kpi = &report.kpi;
        assert_eq!(report.total_frames, 300);
        assert_eq!(report.total_time_sec, 10.0);
        assert_eq!(kpi.get_f64("cycle_time"), Some(10.0));
        assert_eq!(kpi.get_f64("waiting_ratio"), Some(0.3));
        assert_eq!(kpi.get_f64("inspect_ratio"), Some(0.2));
        assert_eq!(kpi.get_f64("walking_ratio"), Some(0.2));
        assert_eq!(kpi.get_f64("static_posture_ratio"), Some(0.1));
        assert_eq!(kpi.get_f64("hold_ratio"), Some(0.1));
        assert_eq!(kpi.get_f64("search_ratio"), Some(0.1));
        assert_eq!(kpi.get_f64("nva_ratio"), Some(0.5));
        assert_eq!(kpi.get_f64("carry_count"), Some(1.0));
        assert_eq!(kpi.get_f64("tool_switch_count"), Some(5.0));
        assert_eq!(kpi.get_f64("roundtrip_count"), Some(0.0));
        assert_eq!(kpi.get_f64("overlap_ratio"), Some(0.0));
        assert_eq!(report.label_distribution.get("WAIT"), Some(&3.0));
        assert_eq!(report.label_distribution.get("GET"), Some(&1.0));

        for (name, value) in kpi.iter().filter(|(name, _)| name.ends_with("_ratio")) {
            let value = value.as_f64();
            assert!((0.0..=1.0).contains(&value), "{name} = {value}");
        }
    }

    #[test]
    fn empty_stream_yields_zero_kpis() {
        let report = compute_metrics(
            &[],
            &[Segment::degenerate(0)],
            &[],
            &ProcessTemplate::default(),
            &MetricsConfig::default(),
        )
        .unwrap();

        assert_eq!(report.total_frames, 0);
        assert_eq!(report.total_time_sec, 0.0);
        for (name, value) in report.kpi.iter() {
            assert_eq!(value.as_f64(), 0.0, "{name}");
        }
        assert!(report.waste_fired.is_empty());
        assert!(report.label_distribution.is_empty());
    }

    #[test]
    fn waste_rules_see_ergonomic_kpis() {
        let frames: Vec<_> = (0..10).map(|i| frame_at(i, 0.5)).collect();
        let labels = vec![label(0, 0, 9, "GET")];
        let template = ProcessTemplate {
            waste_patterns: vec![WastePattern {
                id: "W_TRUNK".into(),
                trigger: Trigger {
                    metric: "trunk_risk_ratio".into(),
                    op: Comparator::Ge,
                    value: 0.0,
                },
                description: "trunk flexion".into(),
                suggestion: "raise the work surface".into(),
            }],
            ..ProcessTemplate::default()
        };

        let report = compute_metrics(
            &frames,
            &segments_of(&labels),
            &labels,
            &template,
            &MetricsConfig::default(),
        )
        .unwrap();
        assert_eq!(report.ergo.valid_frames, 10);
        assert_eq!(report.waste_fired.len(), 1);
        assert_eq!(report.waste_fired[0].metric, "trunk_risk_ratio");
    }

    #[test]
    fn short_segments_never_push_ratios_past_one() {
        // Six 5-frame INSPECT segments cover exactly one second.
        let frames: Vec<_> = (0..30).map(|i| frame_at(i, 0.5)).collect();
        let labels: Vec<_> = (0..6)
            .map(|i| label(i, i * 5, i * 5 + 4, "INSPECT"))
            .collect();
        let report = compute_metrics(
            &frames,
            &segments_of(&labels),
            &labels,
            &ProcessTemplate::default(),
            &MetricsConfig::default(),
        )
        .unwrap();

        assert_eq!(report.kpi.get_f64("inspect_ratio"), Some(1.0));
        let covered: f64 = report.label_distribution.values().sum();
        assert!(covered <= report.total_time_sec + 1e-9);
    }

    #[test]
    fn label_ranges_past_the_stream_are_clipped() {
        let frames: Vec<_> = (0..30).map(|i| frame_at(i, 0.5)).collect();
        let labels = vec![label(0, 0, 14, "WAIT"), label(1, 15, 59, "SEARCH")];
        let report = compute_metrics(
            &frames,
            &segments_of(&labels),
            &labels,
            &ProcessTemplate::default(),
            &MetricsConfig::default(),
        )
        .unwrap();

        assert_eq!(report.kpi.get_f64("search_ratio"), Some(0.5));
        assert_eq!(report.kpi.get_f64("nva_ratio"), Some(1.0));
    }

    #[test]
    fn two_frame_stream_keeps_its_frame_time() {
        let frames = vec![frame_at(0, 0.5), frame_at(1, 0.5)];
        let labels = vec![label(0, 0, 1, "WAIT")];
        let report = compute_metrics(
            &frames,
            &[Segment::degenerate(2)],
            &labels,
            &ProcessTemplate::default(),
            &MetricsConfig::default(),
        )
        .unwrap();

        assert!((report.total_time_sec - 2.0 / FPS).abs() < 1e-12);
        assert_eq!(report.kpi.get_f64("cycle_time"), Some(0.07));
        assert_eq!(report.kpi.get_f64("waiting_ratio"), Some(1.0));

        let single = compute_metrics(
            &frames[..1],
            &[Segment::degenerate(1)],
            &[label(0, 0, 0, "WAIT")],
            &ProcessTemplate::default(),
            &MetricsConfig::default(),
        )
        .unwrap();
        assert_eq!(single.total_time_sec, 0.0);
        assert_eq!(single.kpi.get_f64("waiting_ratio"), Some(0.0));
    }

    #[test]
    fn invalid_fps_is_an_error() {
        let frames = vec![Frame::new(0, -1.0, Vec::new())];
        let result = compute_metrics(
            &frames,
            &[],
            &[],
            &ProcessTemplate::default(),
            &MetricsConfig::default(),
        );
        assert!(result.is_err());
    }
}
