pub mod geometry;
pub mod labels;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod pose;
pub mod segmentation;
pub mod settings;
pub mod templates;
pub mod utils;

use std::path::Path;

use anyhow::{bail, Result};

pub use labels::{label_segments, LabelingConfig};
pub use metrics::{compute_metrics, MetricsConfig, MetricsReport};
pub use models::{Frame, Label, MotionLabel, ProcessTemplate, Segment};
pub use pipeline::{analyze_batch, AnalysisJob, AnalysisResult, AnalysisSummary, Analyzer};
pub use segmentation::{segment_frames, SegmentationConfig};
pub use settings::AnalysisSettings;
pub use templates::TemplateStore;

const USAGE: &str = "usage: workstudy <pose.jsonl> <templates.json> <template-key> [settings.json]";

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    utils::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (frames_path, templates_path, template_key, settings_path) = match args.as_slice() {
        [frames, templates, key] => (frames, templates, key, None),
        [frames, templates, key, settings] => (frames, templates, key, Some(settings)),
        _ => bail!(USAGE),
    };

    log::info!("workstudy starting on {}", frames_path);

    let settings = match settings_path {
        Some(path) => AnalysisSettings::load(Path::new(path))?,
        None => AnalysisSettings::default(),
    };
    let frames = pose::read_frames_jsonl(Path::new(frames_path))?;
    let store = TemplateStore::from_path(Path::new(templates_path))?;
    let template = store.get(template_key)?;

    let analyzer = Analyzer::new(settings)?;
    let result = analyzer.analyze(&frames, template)?;
    let summary = AnalysisSummary::from_result(&result, template);

    let report = serde_json::json!({
        "template": template_key,
        "result": result,
        "summary": summary,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
