//! Error taxonomy for the HAR pipeline.
//!
//! Every error here is unrecoverable at the point of detection: it aborts
//! the current operation (and, inside the sweep, the whole sweep). Rows
//! already appended to the report logs stay valid.

/// Crate-level pipeline error.
#[derive(Debug)]
pub enum PipelineError {
    /// A recording's channel layout does not match the expected 6 channels.
    DataShape(String),
    /// Requested training-group size is outside `1..=subjects-1`, or the
    /// excluded subject is not part of the roster.
    InvalidGroupSize(String),
    /// A requested subject key is absent from the windowed dataset.
    MissingSubject(String),
    /// Opaque failure reported by the trainer.
    Trainer(String),
    /// Filesystem failure while reading or appending.
    Io(String),
    /// Malformed CSV/JSON content.
    Parse(String),
}

impl PipelineError {
    pub fn data_shape(msg: impl Into<String>) -> Self {
        PipelineError::DataShape(msg.into())
    }

    pub fn invalid_group_size(msg: impl Into<String>) -> Self {
        PipelineError::InvalidGroupSize(msg.into())
    }

    pub fn missing_subject(msg: impl Into<String>) -> Self {
        PipelineError::MissingSubject(msg.into())
    }

    pub fn trainer(msg: impl Into<String>) -> Self {
        PipelineError::Trainer(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        PipelineError::Parse(msg.into())
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::DataShape(e) => write!(f, "data shape error: {e}"),
            PipelineError::InvalidGroupSize(e) => write!(f, "invalid group size: {e}"),
            PipelineError::MissingSubject(e) => write!(f, "missing subject: {e}"),
            PipelineError::Trainer(e) => write!(f, "trainer error: {e}"),
            PipelineError::Io(e) => write!(f, "IO error: {e}"),
            PipelineError::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        PipelineError::Io(e.to_string())
    }
}

impl From<csv::Error> for PipelineError {
    fn from(e: csv::Error) -> Self {
        PipelineError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Parse(e.to_string())
    }
}
