//! Activity vocabulary for the sit-stand-walk protocol.
//!
//! The vocabulary is closed and the integer encoding is fixed: it is the
//! index used in the stored ground-truth files and the position of the hot
//! bit in one-hot label vectors, so it must never change between the
//! windowing stage and the evaluation sweep.

use serde::{Deserialize, Serialize};

/// Number of activity classes.
pub const CLASS_COUNT: usize = 5;

/// One activity label of the recording protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Seated,
    StandingUp,
    Walking,
    Turning,
    SittingDown,
}

impl Activity {
    /// All activities in encoding order.
    pub const ALL: [Activity; CLASS_COUNT] = [
        Activity::Seated,
        Activity::StandingUp,
        Activity::Walking,
        Activity::Turning,
        Activity::SittingDown,
    ];

    /// Fixed integer encoding of this activity.
    pub fn index(&self) -> usize {
        match self {
            Activity::Seated => 0,
            Activity::StandingUp => 1,
            Activity::Walking => 2,
            Activity::Turning => 3,
            Activity::SittingDown => 4,
        }
    }

    /// Decode an integer label back into an activity.
    pub fn from_index(index: usize) -> Option<Activity> {
        Activity::ALL.get(index).copied()
    }

    /// Upper-case protocol name, as used in report logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Seated => "SEATED",
            Activity::StandingUp => "STANDING_UP",
            Activity::Walking => "WALKING",
            Activity::Turning => "TURNING",
            Activity::SittingDown => "SITTING_DOWN",
        }
    }

    /// Parse a protocol name.
    pub fn from_str_name(name: &str) -> Option<Activity> {
        Activity::ALL.iter().copied().find(|a| a.as_str() == name)
    }

    /// One-hot vector over the class vocabulary.
    pub fn one_hot(&self) -> Vec<f64> {
        let mut v = vec![0.0; CLASS_COUNT];
        v[self.index()] = 1.0;
        v
    }
}

/// Class names in encoding order, as used by the scorer.
pub fn class_names() -> Vec<&'static str> {
    Activity::ALL.iter().map(|a| a.as_str()).collect()
}
