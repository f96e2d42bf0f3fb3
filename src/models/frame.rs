//! Pose frame data model.
//!
//! One `Frame` is one video sample as delivered by the pose-estimation
//! collaborator. Landmark positions follow the 33-point body convention, so a
//! landmark's meaning is its index in `Frame::landmarks`.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::{round_to, Point2};

/// Frame rate assumed when a stream carries no frames at all.
pub const DEFAULT_FPS: f64 = 30.0;

/// Landmark indices used by the analysis.
pub mod landmark {
    pub const LEFT_SHOULDER: usize = 11;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const LEFT_KNEE: usize = 25;
}

/// One anatomical keypoint: normalized image-plane position plus detection confidence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "frame")]
    pub index: usize,
    pub time_sec: f64,
    pub fps: f64,
    /// Empty when detection failed on this frame.
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl Frame {
    /// Build a frame, deriving `time_sec` from the index and frame rate.
    pub fn new(index: usize, fps: f64, landmarks: Vec<Landmark>) -> Self {
        let time_sec = if fps > 0.0 {
            round_to(index as f64 / fps, 3)
        } else {
            0.0
        };
        Self {
            index,
            time_sec,
            fps,
            landmarks,
        }
    }

    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Right-wrist position, when the frame carries enough landmarks.
    pub fn wrist(&self) -> Option<Point2> {
        self.landmark(landmark::RIGHT_WRIST).map(Landmark::position)
    }

    /// Right-wrist position with dropped detections collapsed onto the origin.
    ///
    /// Known limitation: a dropout reads as a jump to (0, 0) on its first
    /// frame and as zero motion for the rest of the gap.
    pub fn wrist_or_origin(&self) -> Point2 {
        self.wrist().unwrap_or(Point2::ORIGIN)
    }
}

/// Frame rate of a stream: taken from the first frame, `DEFAULT_FPS` when empty.
///
/// Errors when the rate is non-positive, non-finite, or changes mid-stream,
/// since every derived time value depends on it.
pub fn stream_fps(frames: &[Frame]) -> Result<f64> {
    let Some(first) = frames.first() else {
        return Ok(DEFAULT_FPS);
    };

    let fps = first.fps;
    if !fps.is_finite() || fps <= 0.0 {
        bail!("invalid frame rate {fps}: fps must be positive");
    }

    if let Some(frame) = frames.iter().find(|f| f.fps != fps) {
        bail!(
            "frame rate changes mid-stream: frame {} has fps {} but the stream started at {}",
            frame.index,
            frame.fps,
            fps
        );
    }

    Ok(fps)
}
