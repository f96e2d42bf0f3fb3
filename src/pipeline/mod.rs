pub mod analyzer;
pub mod batch;
pub mod summary;

pub use analyzer::{AnalysisResult, Analyzer};
pub use batch::{analyze_batch, AnalysisJob};
pub use summary::{AnalysisSummary, FocusKpi, TimelineRow, WasteHighlight};
