//! Waste-pattern rules evaluated against the computed KPIs.

use crate::metrics::types::{FiredWaste, KpiSet};
use crate::models::WastePattern;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Fired rules, in template order.
///
/// A rule whose metric is not a known KPI, or whose operator is unsupported,
/// never fires.
pub fn evaluate_waste_patterns(patterns: &[WastePattern], kpi: &KpiSet) -> Vec<FiredWaste> {
    patterns
        .iter()
        .filter_map(|pattern| {
            let trigger = &pattern.trigger;
            // An absent metric is not read as 0, so `>= 0` on it stays silent
            let Some(actual) = kpi.get_f64(&trigger.metric) else {
                log_debug!(
                    "waste rule {} skipped: unknown metric {:?}",
                    pattern.id,
                    trigger.metric
                );
                return None;
            };

            if !trigger.op.matches(actual, trigger.value) {
                return None;
            }

            Some(FiredWaste {
                id: pattern.id.clone(),
                description: pattern.description.clone(),
                suggestion: pattern.suggestion.clone(),
                metric: trigger.metric.clone(),
                actual_value: actual,
                threshold: trigger.value,
            })
        })
        .collect()
}
