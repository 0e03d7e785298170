//! Sweep enumeration, separated from model training.
//!
//! The evaluation sweep is a nested iteration: held-out test subject
//! (outermost), training-group size `n`, repetition `i`. Enumerating it as
//! a lazy sequence of step descriptors keeps the combinatorics testable
//! without touching a trainer.

use serde::{Deserialize, Serialize};

/// One fully-specified unit of sweep work, before fanning out per sensor
/// source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepStep {
    pub test_subject: String,
    /// Training-group size.
    pub n: usize,
    /// Repetition index within `(test_subject, n)`.
    pub i: usize,
}

/// The full sweep: which subjects exist, which are held out, and how many
/// repeated random group draws to run per group size.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    /// Full subject roster.
    pub subjects: Vec<String>,
    /// Subjects to hold out, one sweep pass each.
    pub test_subjects: Vec<String>,
    /// Repetitions per `(test_subject, n)` pair.
    pub splits: usize,
}

impl SweepPlan {
    /// Sweep every subject as the held-out one.
    pub fn all_subjects(subjects: Vec<String>, splits: usize) -> Self {
        Self {
            test_subjects: subjects.clone(),
            subjects,
            splits,
        }
    }

    /// Sweep a single held-out subject.
    pub fn single_subject(subjects: Vec<String>, test_subject: String, splits: usize) -> Self {
        Self {
            subjects,
            test_subjects: vec![test_subject],
            splits,
        }
    }

    /// Lazy steps in sweep order: test subject, then n in `1..subjects`,
    /// then repetition.
    pub fn steps(&self) -> impl Iterator<Item = SweepStep> + '_ {
        let group_sizes = 1..self.subjects.len();
        self.test_subjects.iter().flat_map(move |test_subject| {
            group_sizes.clone().flat_map(move |n| {
                (0..self.splits).map(move |i| SweepStep {
                    test_subject: test_subject.clone(),
                    n,
                    i,
                })
            })
        })
    }

    /// Number of steps the sweep will enumerate.
    pub fn total_steps(&self) -> usize {
        self.test_subjects.len() * self.subjects.len().saturating_sub(1) * self.splits
    }
}
