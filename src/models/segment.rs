use serde::{Deserialize, Serialize};

use crate::geometry::round_to;

/// A contiguous, inclusive frame range judged to be one coherent motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start_frame: usize,
    pub end_frame: usize,
    pub start_sec: f64,
    pub end_sec: f64,
    /// Covered time: frame count over fps. Zero for degenerate streams.
    pub duration_sec: f64,
}

impl Segment {
    /// Segment over `[start_frame, end_frame]` with times derived from `fps`.
    ///
    /// The duration runs from this segment's rounded start to the next
    /// segment's rounded start, so durations of adjacent segments add up to
    /// the rounded end of the last one.
    pub fn from_frames(start_frame: usize, end_frame: usize, fps: f64) -> Self {
        let start_sec = round_to(start_frame as f64 / fps, 2);
        let next_start_sec = round_to((end_frame + 1) as f64 / fps, 2);
        Self {
            start_frame,
            end_frame,
            start_sec,
            end_sec: round_to(end_frame as f64 / fps, 2),
            duration_sec: round_to(next_start_sec - start_sec, 2),
        }
    }

    /// Whole-stream segment for streams too short to segment; all times are zero.
    pub fn degenerate(frame_count: usize) -> Self {
        Self {
            start_frame: 0,
            end_frame: frame_count.saturating_sub(1),
            start_sec: 0.0,
            end_sec: 0.0,
            duration_sec: 0.0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.end_frame + 1 - self.start_frame
    }

    pub fn contains(&self, frame_index: usize) -> bool {
        (self.start_frame..=self.end_frame).contains(&frame_index)
    }
}
