//! Fixed-size sliding windows over cleaned recordings.
//!
//! A recording is carved into overlapping windows of `window_size` samples,
//! advanced by `step_size` samples (50% overlap with the defaults). Each
//! window becomes one classifier input: a channel-major 6 x window_size
//! matrix plus the majority activity label over its span. A would-be window
//! that overruns the end of the recording is dropped, never padded.

use crate::core::activity::{Activity, CLASS_COUNT};
use crate::core::recording::{Recording, CHANNEL_COUNT};
use crate::error::PipelineError;

/// Default window length in samples.
pub const WINDOW_SIZE: usize = 50;

/// Default step between window starts (50% overlap).
pub const STEP_SIZE: usize = WINDOW_SIZE / 2;

/// Channel-major window matrix: `CHANNEL_COUNT` rows of `window_size` values.
pub type WindowTensor = Vec<Vec<f64>>;

/// One emitted window with its derived label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledWindow {
    pub values: WindowTensor,
    pub label: Activity,
}

/// Slide a fixed-size window over `recording` and emit every complete
/// window with its majority label.
///
/// Emits `floor((L - W) / S) + 1` windows for a recording of length
/// `L >= W`, and none otherwise. Pure: repeated calls over the same
/// recording produce identical output.
pub fn slide(
    recording: &Recording,
    window_size: usize,
    step_size: usize,
) -> Result<Vec<LabeledWindow>, PipelineError> {
    if window_size == 0 {
        return Err(PipelineError::data_shape("window_size must be > 0"));
    }
    if step_size == 0 || step_size > window_size {
        return Err(PipelineError::data_shape(format!(
            "step_size must be in 1..={window_size}, got {step_size}"
        )));
    }

    // Validate the channel layout up front so a malformed recording fails
    // whole, not after emitting a prefix of its windows.
    for (idx, sample) in recording.samples.iter().enumerate() {
        if sample.channels.len() != CHANNEL_COUNT {
            return Err(PipelineError::data_shape(format!(
                "{}: sample {idx} has {} channels, expected {CHANNEL_COUNT}",
                recording.descriptor(),
                sample.channels.len()
            )));
        }
    }

    let len = recording.samples.len();
    let mut windows = Vec::new();
    let mut start = 0;
    while start + window_size <= len {
        let span = &recording.samples[start..start + window_size];

        let mut values: WindowTensor = vec![Vec::with_capacity(window_size); CHANNEL_COUNT];
        for sample in span {
            for (channel, row) in values.iter_mut().enumerate() {
                row.push(sample.channels[channel]);
            }
        }

        windows.push(LabeledWindow {
            values,
            label: majority_label(span.iter().map(|s| s.activity)),
        });
        start += step_size;
    }

    Ok(windows)
}

/// Most frequent activity among the window's samples.
///
/// Ties are broken by the lowest activity index, so the result is fully
/// determined by the sample labels.
fn majority_label(labels: impl Iterator<Item = Activity>) -> Activity {
    let mut counts = [0usize; CLASS_COUNT];
    for label in labels {
        counts[label.index()] += 1;
    }

    let mut best = 0;
    for (index, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = index;
        }
    }
    Activity::from_index(best).unwrap_or(Activity::Seated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recording::{Sample, SensorSource};
    use chrono::{TimeZone, Utc};

    fn recording_with(labels: &[Activity]) -> Recording {
        let mut rec = Recording::new("s1", "e01", SensorSource::Smartphone);
        for (i, label) in labels.iter().enumerate() {
            rec.samples.push(Sample {
                timestamp: Utc.timestamp_opt(1_600_000_000 + i as i64, 0).unwrap(),
                channels: vec![i as f64; CHANNEL_COUNT],
                activity: *label,
            });
        }
        rec
    }

    fn uniform_recording(len: usize) -> Recording {
        recording_with(&vec![Activity::Walking; len])
    }

    #[test]
    fn test_window_count_formula() {
        // floor((L - W) / S) + 1 for L >= W
        for (len, w, s, expected) in [
            (50, 50, 25, 1),
            (100, 50, 25, 3),
            (125, 50, 25, 4),
            (49, 50, 25, 0),
            (0, 50, 25, 0),
            (10, 5, 5, 2),
            (11, 5, 5, 2),
        ] {
            let rec = uniform_recording(len);
            let windows = slide(&rec, w, s).unwrap();
            assert_eq!(windows.len(), expected, "len={len} w={w} s={s}");
        }
    }

    #[test]
    fn test_window_shape_and_overlap() {
        let rec = uniform_recording(100);
        let windows = slide(&rec, 50, 25).unwrap();

        for window in &windows {
            assert_eq!(window.values.len(), CHANNEL_COUNT);
            for row in &window.values {
                assert_eq!(row.len(), 50);
            }
        }

        // Channel rows hold consecutive sample values; the second window
        // starts 25 samples after the first.
        assert_eq!(windows[0].values[0][0], 0.0);
        assert_eq!(windows[1].values[0][0], 25.0);
        assert_eq!(windows[0].values[0][25..], windows[1].values[0][..25]);
    }

    #[test]
    fn test_majority_label_wins() {
        let mut labels = vec![Activity::Walking; 30];
        labels.extend(vec![Activity::Turning; 20]);
        let rec = recording_with(&labels);

        let windows = slide(&rec, 50, 25).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].label, Activity::Walking);
    }

    #[test]
    fn test_majority_tie_prefers_lowest_index() {
        let mut labels = vec![Activity::Turning; 25];
        labels.extend(vec![Activity::StandingUp; 25]);
        let rec = recording_with(&labels);

        let windows = slide(&rec, 50, 50).unwrap();
        assert_eq!(windows[0].label, Activity::StandingUp);
    }

    #[test]
    fn test_short_recording_yields_no_windows() {
        let rec = uniform_recording(49);
        assert!(slide(&rec, 50, 25).unwrap().is_empty());
    }

    #[test]
    fn test_empty_recording_yields_no_windows() {
        let rec = uniform_recording(0);
        assert!(slide(&rec, 50, 25).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_channels_rejected() {
        let mut rec = uniform_recording(60);
        rec.samples[10].channels.pop();

        let err = slide(&rec, 50, 25).unwrap_err();
        assert!(matches!(err, PipelineError::DataShape(_)));
        assert!(err.to_string().contains("sample 10"));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let rec = uniform_recording(60);
        assert!(slide(&rec, 0, 1).is_err());
        assert!(slide(&rec, 50, 0).is_err());
        assert!(slide(&rec, 50, 51).is_err());
    }

    #[test]
    fn test_idempotent() {
        let mut labels = vec![Activity::Seated; 40];
        labels.extend(vec![Activity::StandingUp; 40]);
        labels.extend(vec![Activity::Walking; 45]);
        let rec = recording_with(&labels);

        let first = slide(&rec, 50, 25).unwrap();
        let second = slide(&rec, 50, 25).unwrap();
        assert_eq!(first, second);
    }
}
