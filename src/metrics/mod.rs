mod types;

pub mod config;
pub mod engine;
pub mod ergo;
pub mod kpi;
pub mod waste;

pub use config::MetricsConfig;
pub use engine::compute_metrics;
pub use kpi::names;
pub use types::{ErgoSummary, FiredWaste, KpiSet, KpiValue, MetricsReport};
