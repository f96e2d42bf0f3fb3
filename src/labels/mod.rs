pub mod config;
pub mod labeler;

pub use config::LabelingConfig;
pub use labeler::{average_wrist_velocity, label_segments};
