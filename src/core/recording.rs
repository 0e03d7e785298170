//! Cleaned sensor recordings.
//!
//! A recording is one continuous labeled stream for a
//! (subject, execution, sensor source) triple, already trimmed, merged and
//! scaled by the upstream cleaning stage. Samples carry the 6 inertial
//! channels (acceleration x/y/z, angular velocity x/y/z) and one activity
//! label each.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::activity::Activity;

/// Expected number of sensor channels per sample.
pub const CHANNEL_COUNT: usize = 6;

/// Wearable device the recording came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorSource {
    /// Smartphone in the trouser pocket ("sp").
    Smartphone,
    /// Wrist-worn smartwatch ("sw").
    Smartwatch,
}

impl SensorSource {
    /// Both sources, in sweep order.
    pub const ALL: [SensorSource; 2] = [SensorSource::Smartphone, SensorSource::Smartwatch];

    /// Short tag used in file names and report paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorSource::Smartphone => "sp",
            SensorSource::Smartwatch => "sw",
        }
    }

    /// Parse a short tag.
    pub fn from_tag(tag: &str) -> Option<SensorSource> {
        match tag {
            "sp" => Some(SensorSource::Smartphone),
            "sw" => Some(SensorSource::Smartwatch),
            _ => None,
        }
    }
}

impl std::fmt::Display for SensorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped, labeled sensor sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    /// Channel values, acc x/y/z then gyro x/y/z. Length is validated by
    /// the windower, not at construction, so malformed rows surface as
    /// `DataShape` errors with recording context attached.
    pub channels: Vec<f64>,
    pub activity: Activity,
}

/// One continuous labeled stream for a (subject, execution, source) triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub subject: String,
    pub execution: String,
    pub source: SensorSource,
    pub samples: Vec<Sample>,
}

impl Recording {
    pub fn new(subject: impl Into<String>, execution: impl Into<String>, source: SensorSource) -> Self {
        Self {
            subject: subject.into(),
            execution: execution.into(),
            source,
            samples: Vec::new(),
        }
    }

    /// Human-readable identifier, e.g. `s3_e02_sp`.
    pub fn descriptor(&self) -> String {
        format!("{}_{}_{}", self.subject, self.execution, self.source)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
