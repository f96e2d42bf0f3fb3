use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::models::{Frame, ProcessTemplate};
use crate::pipeline::analyzer::{AnalysisResult, Analyzer};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_error;

/// One independent analysis: a full frame stream and the template it is judged against.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub frames: Vec<Frame>,
    pub template: Arc<ProcessTemplate>,
}

/// Run independent jobs concurrently on the blocking pool.
///
/// Runs share nothing mutable; results come back in job order and a failed
/// job does not affect the others.
pub async fn analyze_batch(
    analyzer: Arc<Analyzer>,
    jobs: Vec<AnalysisJob>,
) -> Vec<Result<AnalysisResult>> {
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let analyzer = Arc::clone(&analyzer);
            tokio::task::spawn_blocking(move || analyzer.analyze(&job.frames, &job.template))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (index, handle) in handles.into_iter().enumerate() {
        let result = match handle.await {
            Ok(result) => result,
            Err(err) => Err(anyhow!("analysis worker panicked: {err}")),
        };
        if let Err(err) = &result {
            log_error!("batch job {} failed: {:#}", index, err);
        }
        results.push(result);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{landmark, Landmark, MotionLabel};

    fn job(len: usize, fps: f64, step: f64) -> AnalysisJob {
        let frames = (0..len)
            .map(|i| {
                let mut landmarks = vec![Landmark::new(0.5, 0.5); 33];
                let x = if i % 2 == 0 { 0.4 } else { 0.4 + step };
                landmarks[landmark::RIGHT_WRIST] = Landmark::new(x, 0.5);
                Frame::new(i, fps, landmarks)
            })
            .collect();
        AnalysisJob {
            frames,
            template: Arc::new(ProcessTemplate::default()),
        }
    }

    #[tokio::test]
    async fn results_come_back_in_job_order() {
        let jobs = vec![job(60, 30.0, 0.0), job(60, 30.0, 0.2), job(45, 15.0, 0.0)];
        let results = analyze_batch(Arc::new(Analyzer::default()), jobs).await;

        assert_eq!(results.len(), 3);
        let first = results[0].as_ref().unwrap();
        let second = results[1].as_ref().unwrap();
        let third = results[2].as_ref().unwrap();
        assert_eq!(first.labels[0].label, MotionLabel::Wait);
        assert_eq!(second.labels[0].label, MotionLabel::Move);
        assert_eq!(third.metrics.total_time_sec, 3.0);
        assert_ne!(first.run_id, second.run_id);
    }

    #[tokio::test]
    async fn one_failure_does_not_sink_the_batch() {
        let jobs = vec![job(30, 30.0, 0.0), job(30, -1.0, 0.0), job(30, 30.0, 0.0)];
        let results = analyze_batch(Arc::new(Analyzer::default()), jobs).await;

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
