//! Reader for the JSON-lines frame streams written by the pose estimator.
//!
//! One frame per line:
//! `{"frame": 0, "time_sec": 0.0, "fps": 30.0, "landmarks": [{"x": .., "y": .., "z": .., "visibility": ..}, ...]}`

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::models::Frame;

pub fn read_frames_jsonl(path: &Path) -> Result<Vec<Frame>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pose stream from {}", path.display()))?;
    parse_frames_jsonl(&contents)
        .with_context(|| format!("Failed to parse pose stream in {}", path.display()))
}

/// Parse a JSON-lines frame stream; blank lines are skipped.
pub fn parse_frames_jsonl(contents: &str) -> Result<Vec<Frame>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str::<Frame>(line)
                .with_context(|| format!("invalid frame record on line {}", number + 1))
        })
        .collect()
}
