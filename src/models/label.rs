//! Therblig label vocabulary and the per-segment label record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Elemental-motion category assigned to a segment.
///
/// Codes outside the fixed vocabulary (e.g. from a hand-edited template)
/// survive as `Other` and describe themselves with their own code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MotionLabel {
    Get,
    Position,
    Inspect,
    Put,
    Record,
    Move,
    UseTool,
    Wait,
    Search,
    Hold,
    Rest,
    Other(String),
}

/// The fixed vocabulary, in canonical order.
pub const VOCABULARY: [MotionLabel; 11] = [
    MotionLabel::Get,
    MotionLabel::Position,
    MotionLabel::Inspect,
    MotionLabel::Put,
    MotionLabel::Record,
    MotionLabel::Move,
    MotionLabel::UseTool,
    MotionLabel::Wait,
    MotionLabel::Search,
    MotionLabel::Hold,
    MotionLabel::Rest,
];

impl MotionLabel {
    pub fn from_code(code: &str) -> Self {
        match code {
            "GET" => MotionLabel::Get,
            "POSITION" => MotionLabel::Position,
            "INSPECT" => MotionLabel::Inspect,
            "PUT" => MotionLabel::Put,
            "RECORD" => MotionLabel::Record,
            "MOVE" => MotionLabel::Move,
            "USE_TOOL" => MotionLabel::UseTool,
            "WAIT" => MotionLabel::Wait,
            "SEARCH" => MotionLabel::Search,
            "HOLD" => MotionLabel::Hold,
            "REST" => MotionLabel::Rest,
            other => MotionLabel::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            MotionLabel::Get => "GET",
            MotionLabel::Position => "POSITION",
            MotionLabel::Inspect => "INSPECT",
            MotionLabel::Put => "PUT",
            MotionLabel::Record => "RECORD",
            MotionLabel::Move => "MOVE",
            MotionLabel::UseTool => "USE_TOOL",
            MotionLabel::Wait => "WAIT",
            MotionLabel::Search => "SEARCH",
            MotionLabel::Hold => "HOLD",
            MotionLabel::Rest => "REST",
            MotionLabel::Other(code) => code,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            MotionLabel::Get => "Grasp",
            MotionLabel::Position => "Position",
            MotionLabel::Inspect => "Inspect",
            MotionLabel::Put => "Release Load",
            MotionLabel::Record => "Record",
            MotionLabel::Move => "Transport Loaded",
            MotionLabel::UseTool => "Use Tool",
            MotionLabel::Wait => "Unavoidable Delay",
            MotionLabel::Search => "Search",
            MotionLabel::Hold => "Hold",
            MotionLabel::Rest => "Rest",
            MotionLabel::Other(code) => code,
        }
    }

    /// WAIT, SEARCH and HOLD count as non-value-added time.
    pub fn is_non_value_added(&self) -> bool {
        matches!(
            self,
            MotionLabel::Wait | MotionLabel::Search | MotionLabel::Hold
        )
    }
}

impl From<String> for MotionLabel {
    fn from(code: String) -> Self {
        MotionLabel::from_code(&code)
    }
}

impl From<&str> for MotionLabel {
    fn from(code: &str) -> Self {
        MotionLabel::from_code(code)
    }
}

impl From<MotionLabel> for String {
    fn from(label: MotionLabel) -> Self {
        label.code().to_string()
    }
}

impl fmt::Display for MotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classification of one segment, with its bounds copied from the segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub segment_id: usize,
    pub start_frame: usize,
    pub end_frame: usize,
    pub start_sec: f64,
    pub end_sec: f64,
    pub label: MotionLabel,
    pub label_description: String,
    pub duration_sec: f64,
    /// Mean per-frame wrist displacement, rounded to 4 decimals.
    pub avg_velocity: f64,
    pub is_non_value_added: bool,
}
