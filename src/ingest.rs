//! Loading cleaned recordings from CSV.
//!
//! The cleaning stage leaves one CSV per (subject, execution, source)
//! triple under the subject's directory, e.g. `02_CLEAN/s3/s3_e02_sp.csv`,
//! with the header `timestamp,x_acc,y_acc,z_acc,x_gyro,y_gyro,z_gyro,activity`
//! and RFC 3339 timestamps. Raw-file parsing and scaling happen upstream;
//! this module only reads the cleaned form back.

use std::path::Path;

use chrono::{DateTime, Utc};
use csv::ReaderBuilder;

use crate::core::activity::Activity;
use crate::core::recording::{Recording, Sample, SensorSource, CHANNEL_COUNT};
use crate::core::windowing::slide;
use crate::dataset::WindowedDataset;
use crate::error::PipelineError;
use crate::store::list_subject_dirs;

/// Recordings shorter than this print a data-quality warning.
const SHORT_RECORDING_THRESHOLD: usize = 100;

/// Load every cleaned recording under `dir`, sorted by subject and file name.
pub fn load_clean_dir(dir: &Path) -> Result<Vec<Recording>, PipelineError> {
    let mut recordings = Vec::new();
    for subject in list_subject_dirs(dir)? {
        let subject_dir = dir.join(&subject);
        let mut files: Vec<_> = std::fs::read_dir(&subject_dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
            .collect();
        files.sort();

        for path in files {
            let recording = load_recording(&path)?;
            if recording.len() < SHORT_RECORDING_THRESHOLD {
                eprintln!(
                    "WARNING on {}: only {} samples",
                    recording.descriptor(),
                    recording.len()
                );
            }
            recordings.push(recording);
        }
    }
    Ok(recordings)
}

/// Load one cleaned recording; identity comes from the file name.
pub fn load_recording(path: &Path) -> Result<Recording, PipelineError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let (subject, execution, source) = parse_descriptor(&stem)?;

    let mut recording = Recording::new(subject, execution, source);
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != CHANNEL_COUNT + 2 {
            return Err(PipelineError::parse(format!(
                "{stem}: row {} has {} columns, expected {}",
                row_idx + 1,
                record.len(),
                CHANNEL_COUNT + 2
            )));
        }

        let timestamp: DateTime<Utc> = record[0].parse().map_err(|_| {
            PipelineError::parse(format!("{stem}: bad timestamp in row {}", row_idx + 1))
        })?;
        let mut channels = Vec::with_capacity(CHANNEL_COUNT);
        for col in 1..=CHANNEL_COUNT {
            let value: f64 = record[col].parse().map_err(|_| {
                PipelineError::parse(format!(
                    "{stem}: bad channel value in row {}, column {col}",
                    row_idx + 1
                ))
            })?;
            channels.push(value);
        }
        let activity = Activity::from_str_name(&record[CHANNEL_COUNT + 1]).ok_or_else(|| {
            PipelineError::parse(format!(
                "{stem}: unknown activity {:?} in row {}",
                &record[CHANNEL_COUNT + 1],
                row_idx + 1
            ))
        })?;

        recording.samples.push(Sample {
            timestamp,
            channels,
            activity,
        });
    }

    Ok(recording)
}

/// Window a batch of recordings into a dataset keyed by (subject, source).
///
/// Recording order is preserved, so repeated windows for the same key
/// concatenate in run order.
pub fn window_recordings(
    recordings: &[Recording],
    window_size: usize,
    step_size: usize,
) -> Result<WindowedDataset, PipelineError> {
    let mut dataset = WindowedDataset::new();
    for recording in recordings {
        let windows = slide(recording, window_size, step_size)?;
        dataset.extend(&recording.subject, recording.source, windows);
    }
    Ok(dataset)
}

/// Split `s3_e02_sp` into subject, execution and source.
fn parse_descriptor(stem: &str) -> Result<(String, String, SensorSource), PipelineError> {
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() != 3 {
        return Err(PipelineError::parse(format!(
            "file name {stem:?} is not <subject>_<execution>_<source>"
        )));
    }
    let source = SensorSource::from_tag(parts[2]).ok_or_else(|| {
        PipelineError::parse(format!("file name {stem:?} has unknown source {:?}", parts[2]))
    })?;
    Ok((parts[0].to_string(), parts[1].to_string(), source))
}
