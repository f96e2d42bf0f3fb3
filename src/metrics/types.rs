use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single KPI value: counts stay integral, everything else is a float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KpiValue {
    Count(u64),
    Ratio(f64),
}

impl KpiValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            KpiValue::Count(count) => count as f64,
            KpiValue::Ratio(value) => value,
        }
    }
}

/// Flat KPI name → value map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiSet(BTreeMap<String, KpiValue>);

impl KpiSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_count(&mut self, name: &str, count: u64) {
        self.0.insert(name.to_string(), KpiValue::Count(count));
    }

    pub fn insert_ratio(&mut self, name: &str, value: f64) {
        self.0.insert(name.to_string(), KpiValue::Ratio(value));
    }

    pub fn get(&self, name: &str) -> Option<KpiValue> {
        self.0.get(name).copied()
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).map(|value| value.as_f64())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, KpiValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErgoSummary {
    pub trunk_risk_ratio: f64,
    pub shoulder_risk_ratio: f64,
    pub trunk_threshold_deg: f64,
    pub shoulder_threshold_deg: f64,
    /// Frames that carried every landmark the angles need.
    pub valid_frames: usize,
}

/// A waste rule whose trigger matched, in template order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredWaste {
    pub id: String,
    pub description: String,
    pub suggestion: String,
    pub metric: String,
    pub actual_value: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub kpi: KpiSet,
    pub ergo: ErgoSummary,
    pub waste_fired: Vec<FiredWaste>,
    /// Accumulated seconds per label code, unrounded; sums to at most `total_time_sec`.
    pub label_distribution: BTreeMap<String, f64>,
    pub total_time_sec: f64,
    pub total_frames: usize,
}
