//! Random training-group generation for leave-N-subjects-out sweeps.
//!
//! For a held-out test subject, a training group is a uniform random draw
//! of `n` subjects from the remaining roster. The sweep calls this once per
//! repetition to sample variance across subject compositions, so successive
//! calls with the same arguments are expected to differ.

use rand::seq::SliceRandom;

use crate::error::PipelineError;

/// Draw `n` training subjects from `subjects`, never including `excluded`.
///
/// The returned group is sorted so its serialized form in the group log is
/// stable regardless of draw order.
pub fn generate_group(
    subjects: &[String],
    n: usize,
    excluded: &str,
) -> Result<Vec<String>, PipelineError> {
    if !subjects.iter().any(|s| s == excluded) {
        return Err(PipelineError::invalid_group_size(format!(
            "excluded subject {excluded} is not in the roster"
        )));
    }

    let max = subjects.len() - 1;
    if n == 0 || n > max {
        return Err(PipelineError::invalid_group_size(format!(
            "n={n} out of range 1..={max}"
        )));
    }

    let candidates: Vec<&String> = subjects.iter().filter(|s| s.as_str() != excluded).collect();
    let mut group: Vec<String> = candidates
        .choose_multiple(&mut rand::thread_rng(), n)
        .map(|s| s.to_string())
        .collect();
    group.sort();

    Ok(group)
}
