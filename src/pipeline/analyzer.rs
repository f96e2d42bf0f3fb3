use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::labels::label_segments;
use crate::metrics::{compute_metrics, MetricsReport};
use crate::models::{stream_fps, Frame, Label, ProcessTemplate, Segment};
use crate::segmentation::segment_frames;
use crate::settings::AnalysisSettings;
use crate::templates::TemplateStore;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub run_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub segments: Vec<Segment>,
    pub labels: Vec<Label>,
    pub metrics: MetricsReport,
}

/// Runs segmentation, labeling and metrics strictly in that order.
///
/// Holds only read-only calibration, so one analyzer can serve any number of
/// concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    settings: AnalysisSettings,
}

impl Analyzer {
    pub fn new(settings: AnalysisSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn analyze(&self, frames: &[Frame], template: &ProcessTemplate) -> Result<AnalysisResult> {
        // All time math downstream depends on a sane frame rate
        let fps = stream_fps(frames)?;

        let run_id = Uuid::new_v4();
        log_info!(
            "analysis {}: {} frames at {} fps",
            run_id,
            frames.len(),
            fps
        );

        let segments = segment_frames(frames, &self.settings.segmentation)?;
        let labels = label_segments(&segments, frames, template, &self.settings.labeling);
        let metrics = compute_metrics(frames, &segments, &labels, template, &self.settings.metrics)?;

        log_info!(
            "analysis {}: {} segments, {} waste rules fired",
            run_id,
            segments.len(),
            metrics.waste_fired.len()
        );

        Ok(AnalysisResult {
            run_id,
            analyzed_at: Utc::now(),
            segments,
            labels,
            metrics,
        })
    }

    /// Look the template up by key first; an unknown key fails the run.
    pub fn analyze_with_store(
        &self,
        frames: &[Frame],
        store: &TemplateStore,
        template_key: &str,
    ) -> Result<AnalysisResult> {
        let template = store.get(template_key)?;
        self.analyze(frames, template)
    }
}
