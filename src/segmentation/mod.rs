pub mod algorithm;
pub mod config;

pub use algorithm::{moving_average_same, segment_frames, wrist_velocities};
pub use config::SegmentationConfig;
