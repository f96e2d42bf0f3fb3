//! Operator-facing digest of one analysis run.
//!
//! Rendering (PDF, spreadsheet, UI) happens elsewhere; this is the plain
//! record those consumers start from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::KpiValue;
use crate::models::{MotionLabel, ProcessTemplate};
use crate::pipeline::analyzer::AnalysisResult;

const MAX_FOCUS_KPIS: usize = 5;
const MAX_WASTE_HIGHLIGHTS: usize = 3;
const MAX_TIMELINE_ROWS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusKpi {
    pub name: String,
    /// `None` when the template names a KPI the engine does not produce.
    pub value: Option<KpiValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteHighlight {
    pub id: String,
    pub description: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    /// 1-based position in the label sequence.
    pub position: usize,
    pub start_sec: f64,
    pub end_sec: f64,
    pub label: MotionLabel,
    pub duration_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub run_id: Uuid,
    pub template_label: Option<String>,
    pub focus_kpis: Vec<FocusKpi>,
    pub waste_highlights: Vec<WasteHighlight>,
    pub waste_fired_total: usize,
    pub trunk_risk_ratio: f64,
    pub shoulder_risk_ratio: f64,
    pub timeline: Vec<TimelineRow>,
}

impl AnalysisSummary {
    pub fn from_result(result: &AnalysisResult, template: &ProcessTemplate) -> Self {
        let metrics = &result.metrics;

        let focus_kpis = template
            .focus_kpi
            .iter()
            .take(MAX_FOCUS_KPIS)
            .map(|name| FocusKpi {
                name: name.clone(),
                value: metrics.kpi.get(name),
            })
            .collect();

        let waste_highlights = metrics
            .waste_fired
            .iter()
            .take(MAX_WASTE_HIGHLIGHTS)
            .map(|waste| WasteHighlight {
                id: waste.id.clone(),
                description: waste.description.clone(),
                suggestion: waste.suggestion.clone(),
            })
            .collect();

        let timeline = result
            .labels
            .iter()
            .take(MAX_TIMELINE_ROWS)
            .enumerate()
            .map(|(i, label)| TimelineRow {
                position: i + 1,
                start_sec: label.start_sec,
                end_sec: label.end_sec,
                label: label.label.clone(),
                duration_sec: label.duration_sec,
            })
            .collect();

        Self {
            run_id: result.run_id,
            template_label: template.label.clone(),
            focus_kpis,
            waste_highlights,
            waste_fired_total: metrics.waste_fired.len(),
            trunk_risk_ratio: metrics.ergo.trunk_risk_ratio,
            shoulder_risk_ratio: metrics.ergo.shoulder_risk_ratio,
            timeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{landmark, Comparator, Frame, Landmark, Trigger, WastePattern};
    use crate::pipeline::Analyzer;

    fn busy_stream() -> Vec<Frame> {
        // Alternating bursts of stillness and fast motion, 30 frames each.
        (0..900)
            .map(|i| {
                let mut landmarks = vec![Landmark::new(0.5, 0.5); 33];
                let moving = (i / 30) % 2 == 1;
                let x = if moving && i % 2 == 1 { 0.7 } else { 0.5 };
                landmarks[landmark::RIGHT_WRIST] = Landmark::new(x, 0.5);
                Frame::new(i, 30.0, landmarks)
            })
            .collect()
    }

    fn always_fires(id: &str) -> WastePattern {
        WastePattern {
            id: id.to_string(),
            trigger: Trigger {
                metric: "cycle_time".into(),
                op: Comparator::Ge,
                value: 0.0,
            },
            description: format!("{id} fired"),
            suggestion: "look closer".into(),
        }
    }

    #[test]
    fn summary_caps_each_section() {
        let template = ProcessTemplate {
            label: Some("Packing".into()),
            focus_kpi: vec![
                "cycle_time".into(),
                "waiting_ratio".into(),
                "not_a_kpi".into(),
                "carry_count".into(),
                "nva_ratio".into(),
                "hand_travel".into(),
            ],
            waste_patterns: (0..5).map(|i| always_fires(&format!("W{i}"))).collect(),
            ..ProcessTemplate::default()
        };

        let result = Analyzer::default().analyze(&busy_stream(), &template).unwrap();
        let summary = AnalysisSummary::from_result(&result, &template);

        assert_eq!(summary.template_label.as_deref(), Some("Packing"));
        assert_eq!(summary.focus_kpis.len(), 5);
        assert_eq!(summary.focus_kpis[0].value, Some(KpiValue::Ratio(30.0)));
        assert_eq!(summary.focus_kpis[2].value, None);
        assert_eq!(summary.waste_fired_total, 5);
        assert_eq!(summary.waste_highlights.len(), 3);
        assert_eq!(summary.waste_highlights[0].id, "W0");
        assert!(result.labels.len() > 20);
        assert_eq!(summary.timeline.len(), 20);
        assert_eq!(summary.timeline[0].position, 1);
        assert_eq!(summary.run_id, result.run_id);
    }
}
