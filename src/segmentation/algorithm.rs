use anyhow::Result;

use crate::models::{stream_fps, Frame, Segment};
use crate::segmentation::config::SegmentationConfig;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Streams shorter than this collapse into one degenerate segment.
const MIN_SEGMENTABLE_FRAMES: usize = 3;

/// Main segmentation function: splits a frame stream at wrist-velocity change points.
///
/// The returned segments partition `0..frames.len()`: each frame belongs to
/// exactly one segment and the last segment ends on the last frame.
pub fn segment_frames(frames: &[Frame], config: &SegmentationConfig) -> Result<Vec<Segment>> {
    let fps = stream_fps(frames)?;

    // Edge case: too short to carry a velocity profile
    if frames.len() < MIN_SEGMENTABLE_FRAMES {
        return Ok(vec![Segment::degenerate(frames.len())]);
    }

    // Step 1: Raw per-frame wrist speed
    let velocities = wrist_velocities(frames);

    // Step 2: Smooth out detection jitter
    let smoothed = moving_average_same(&velocities, config.smoothing_window);

    // Step 3: Debounced moving/still change points
    let boundaries = find_boundaries(&smoothed, config);
    log_debug!(
        "segmentation: {} frames, boundaries at {:?}",
        frames.len(),
        boundaries
    );

    // Step 4: Boundaries to inclusive frame ranges
    Ok(boundaries_to_segments(&boundaries, fps))
}

/// Per-frame Euclidean wrist displacement; the first frame is 0.
///
/// Frames without a wrist landmark read as (0, 0), so a dropout shows up as a
/// spike on its first frame and as stillness for the rest of the gap.
pub fn wrist_velocities(frames: &[Frame]) -> Vec<f64> {
    let positions: Vec<_> = frames.iter().map(Frame::wrist_or_origin).collect();

    std::iter::once(0.0)
        .chain(positions.windows(2).map(|pair| pair[0].distance_to(&pair[1])))
        .take(frames.len())
        .collect()
}

/// Centered moving average with "same"-length output.
///
/// Edge windows are zero-padded and still divided by the full window size,
/// so the ends of the stream are damped rather than renormalized.
pub fn moving_average_same(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.is_empty() {
        return values.to_vec();
    }

    let last = values.len() - 1;
    let forward = (window - 1) / 2;
    let backward = window - 1 - forward;

    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(backward);
            let hi = (i + forward).min(last);
            values[lo..=hi].iter().sum::<f64>() / window as f64
        })
        .collect()
}

/// Frame indices where a new segment starts, plus the forced final index.
fn find_boundaries(smoothed: &[f64], config: &SegmentationConfig) -> Vec<usize> {
    let mut boundaries = vec![0];
    let Some((&first, rest)) = smoothed.split_first() else {
        return boundaries;
    };

    let is_moving = |velocity: f64| velocity > config.velocity_threshold;
    let mut previous = is_moving(first);

    for (offset, &velocity) in rest.iter().enumerate() {
        let index = offset + 1;
        let current = is_moving(velocity);
        let last_boundary = boundaries[boundaries.len() - 1];

        if current != previous && index - last_boundary >= config.min_segment_frames {
            boundaries.push(index);
        }
        previous = current;
    }

    let last_index = smoothed.len() - 1;
    if boundaries[boundaries.len() - 1] != last_index {
        boundaries.push(last_index);
    }

    boundaries
}

/// Consecutive boundary pairs become `[b_i, b_{i+1} - 1]`; the final pair keeps its end.
fn boundaries_to_segments(boundaries: &[usize], fps: f64) -> Vec<Segment> {
    let pair_count = boundaries.len().saturating_sub(1);

    boundaries
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let end = if i + 1 == pair_count { pair[1] } else { pair[1] - 1 };
            Segment::from_frames(pair[0], end, fps)
        })
        .collect()
}
