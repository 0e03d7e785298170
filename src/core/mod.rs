//! Core functionality for the HAR pipeline.
//!
//! This module contains:
//! - The activity vocabulary and its fixed integer encoding
//! - Cleaned recording types for the 6-channel inertial streams
//! - Sliding-window extraction with majority labeling
//! - Random training-group generation for the leave-N-out sweep

pub mod activity;
pub mod grouping;
pub mod recording;
pub mod windowing;

// Re-export commonly used types
pub use activity::{class_names, Activity, CLASS_COUNT};
pub use grouping::generate_group;
pub use recording::{Recording, Sample, SensorSource, CHANNEL_COUNT};
pub use windowing::{slide, LabeledWindow, WindowTensor, STEP_SIZE, WINDOW_SIZE};
