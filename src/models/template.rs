//! Process template data models.
//!
//! Templates are external configuration: one per supported process type,
//! read-only for the duration of a run.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::label::MotionLabel;

pub const DEFAULT_TRUNK_DEG_GT: f64 = 40.0;
pub const DEFAULT_SHOULDER_DEG_GT: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessTemplate {
    /// Display name shown to operators when picking a template.
    #[serde(default)]
    pub label: Option<String>,
    /// Nominal cyclic label sequence; may be empty.
    #[serde(default)]
    pub expected_flow: Vec<MotionLabel>,
    #[serde(default)]
    pub ergo_thresholds: ErgoThresholds,
    #[serde(default)]
    pub waste_patterns: Vec<WastePattern>,
    /// KPIs report consumers highlight for this process.
    #[serde(default)]
    pub focus_kpi: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErgoThresholds {
    #[serde(default = "default_trunk_deg_gt")]
    pub trunk_deg_gt: f64,
    #[serde(default = "default_shoulder_deg_gt")]
    pub shoulder_deg_gt: f64,
}

impl Default for ErgoThresholds {
    fn default() -> Self {
        Self {
            trunk_deg_gt: DEFAULT_TRUNK_DEG_GT,
            shoulder_deg_gt: DEFAULT_SHOULDER_DEG_GT,
        }
    }
}

fn default_trunk_deg_gt() -> f64 {
    DEFAULT_TRUNK_DEG_GT
}

fn default_shoulder_deg_gt() -> f64 {
    DEFAULT_SHOULDER_DEG_GT
}

/// A rule that fires when a KPI crosses a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WastePattern {
    pub id: String,
    #[serde(default)]
    pub trigger: Trigger,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default)]
    pub metric: String,
    #[serde(default)]
    pub op: Comparator,
    #[serde(default)]
    pub value: f64,
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            metric: String::new(),
            op: Comparator::Gt,
            value: 0.0,
        }
    }
}

/// Threshold comparator of a waste trigger.
///
/// Operators other than `>` and `>=` are kept verbatim and never match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Comparator {
    #[default]
    Gt,
    Ge,
    Unsupported(String),
}

impl Comparator {
    pub fn symbol(&self) -> &str {
        match self {
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Unsupported(op) => op,
        }
    }

    pub fn matches(&self, actual: f64, threshold: f64) -> bool {
        match self {
            Comparator::Gt => actual > threshold,
            Comparator::Ge => actual >= threshold,
            Comparator::Unsupported(_) => false,
        }
    }
}

impl From<String> for Comparator {
    fn from(op: String) -> Self {
        match op.trim() {
            ">" => Comparator::Gt,
            ">=" => Comparator::Ge,
            _ => Comparator::Unsupported(op),
        }
    }
}

impl From<Comparator> for String {
    fn from(op: Comparator) -> Self {
        op.symbol().to_string()
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let template: ProcessTemplate = serde_json::from_str(r#"{"expected_flow": ["GET", "PUT"]}"#).unwrap();
        assert_eq!(template.expected_flow, vec![MotionLabel::Get, MotionLabel::Put]);
        assert_eq!(template.ergo_thresholds, ErgoThresholds::default());
        assert!(template.waste_patterns.is_empty());

        let thresholds: ErgoThresholds = serde_json::from_str(r#"{"trunk_deg_gt": 30}"#).unwrap();
        assert_eq!(thresholds.trunk_deg_gt, 30.0);
        assert_eq!(thresholds.shoulder_deg_gt, DEFAULT_SHOULDER_DEG_GT);
    }

    #[test]
    fn trigger_defaults_to_strict_greater_than() {
        let pattern: WastePattern = serde_json::from_str(
            r#"{"id": "W1", "trigger": {"metric": "waiting_ratio", "value": 0.3}}"#,
        )
        .unwrap();
        assert_eq!(pattern.trigger.op, Comparator::Gt);
        assert_eq!(pattern.description, "");
    }

    #[test]
    fn comparator_semantics() {
        assert!(Comparator::Gt.matches(0.35, 0.3));
        assert!(!Comparator::Gt.matches(0.3, 0.3));
        assert!(Comparator::Ge.matches(0.3, 0.3));

        let odd = Comparator::from("<".to_string());
        assert_eq!(odd, Comparator::Unsupported("<".into()));
        assert!(!odd.matches(0.0, 1.0));
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"<\"");
    }
}
