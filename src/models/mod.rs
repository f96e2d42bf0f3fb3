pub mod frame;
pub mod label;
pub mod segment;
pub mod template;

pub use frame::{landmark, stream_fps, Frame, Landmark, DEFAULT_FPS};
pub use label::{Label, MotionLabel, VOCABULARY};
pub use segment::Segment;
pub use template::{Comparator, ErgoThresholds, ProcessTemplate, Trigger, WastePattern};
