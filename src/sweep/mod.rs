//! Leave-N-subjects-out evaluation sweep.
//!
//! This module contains:
//! - Lazy enumeration of sweep steps (`plan`)
//! - The orchestrator driving group generation, training, scoring and
//!   report logging (`orchestrator`)

pub mod orchestrator;
pub mod plan;

// Re-export commonly used types
pub use orchestrator::{Orchestrator, SweepConfig, SweepSummary};
pub use plan::{SweepPlan, SweepStep};
