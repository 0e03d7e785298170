//! Windowed dataset container and train/test set builder.
//!
//! The container maps a `(subject, source)` key to the windows produced for
//! that subject on that device, with an aligned label sequence. Order is
//! emission order: temporal within a recording, recording run order across
//! recordings for the same key.

use std::collections::BTreeMap;

use crate::core::activity::Activity;
use crate::core::recording::SensorSource;
use crate::core::windowing::{LabeledWindow, WindowTensor};
use crate::error::PipelineError;

/// Key schema of the windowed dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatasetKey {
    pub subject: String,
    pub source: SensorSource,
}

/// Aligned windows and labels for one `(subject, source)` key.
#[derive(Debug, Clone, Default)]
pub struct SubjectWindows {
    pub windows: Vec<WindowTensor>,
    pub labels: Vec<Activity>,
}

/// Train/test partition handed to the trainer and scorer. Labels are
/// one-hot encoded over the activity vocabulary.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Vec<WindowTensor>,
    pub y_train: Vec<Vec<f64>>,
    pub x_test: Vec<WindowTensor>,
    pub y_test: Vec<Vec<f64>>,
}

/// Windowed data for every subject and sensor source.
///
/// A `BTreeMap` keeps subject iteration order deterministic.
#[derive(Debug, Clone, Default)]
pub struct WindowedDataset {
    entries: BTreeMap<DatasetKey, SubjectWindows>,
}

impl WindowedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append windows for a key, preserving emission order across calls.
    pub fn extend(&mut self, subject: &str, source: SensorSource, windows: Vec<LabeledWindow>) {
        let entry = self
            .entries
            .entry(DatasetKey {
                subject: subject.to_string(),
                source,
            })
            .or_default();
        for window in windows {
            entry.windows.push(window.values);
            entry.labels.push(window.label);
        }
    }

    /// Insert pre-aligned windows and labels, validating the alignment
    /// invariant at the boundary (used when loading the on-disk store).
    pub fn insert_aligned(
        &mut self,
        subject: &str,
        source: SensorSource,
        windows: Vec<WindowTensor>,
        labels: Vec<Activity>,
    ) -> Result<(), PipelineError> {
        if windows.len() != labels.len() {
            return Err(PipelineError::data_shape(format!(
                "{subject}_{source}: {} windows but {} labels",
                windows.len(),
                labels.len()
            )));
        }
        let entry = self
            .entries
            .entry(DatasetKey {
                subject: subject.to_string(),
                source,
            })
            .or_default();
        entry.windows.extend(windows);
        entry.labels.extend(labels);
        Ok(())
    }

    pub fn get(&self, subject: &str, source: SensorSource) -> Option<&SubjectWindows> {
        self.entries.get(&DatasetKey {
            subject: subject.to_string(),
            source,
        })
    }

    /// Distinct subjects present, sorted.
    pub fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.entries.keys().map(|k| k.subject.clone()).collect();
        subjects.dedup();
        subjects
    }

    /// Sensor sources with data present, in sweep order.
    pub fn sources(&self) -> Vec<SensorSource> {
        SensorSource::ALL
            .into_iter()
            .filter(|source| self.entries.keys().any(|k| k.source == *source))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DatasetKey, &SubjectWindows)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Window count per activity class across the whole dataset.
    pub fn class_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.entries.values() {
            for label in &entry.labels {
                *counts.entry(label.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Build train and test sets for one sensor source.
    ///
    /// Windows are concatenated in subject-then-temporal order. Callers
    /// guarantee `train_subjects` and `test_subjects` are disjoint; the
    /// builder never mixes them because each subject's windows are copied
    /// into exactly the partition that names it.
    pub fn build_sets(
        &self,
        source: SensorSource,
        train_subjects: &[String],
        test_subjects: &[String],
    ) -> Result<TrainTestSplit, PipelineError> {
        let (x_train, y_train) = self.collect_partition(source, train_subjects)?;
        let (x_test, y_test) = self.collect_partition(source, test_subjects)?;
        Ok(TrainTestSplit {
            x_train,
            y_train,
            x_test,
            y_test,
        })
    }

    fn collect_partition(
        &self,
        source: SensorSource,
        subjects: &[String],
    ) -> Result<(Vec<WindowTensor>, Vec<Vec<f64>>), PipelineError> {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for subject in subjects {
            let entry = self.get(subject, source).ok_or_else(|| {
                PipelineError::missing_subject(format!("{subject} (source {source})"))
            })?;
            x.extend(entry.windows.iter().cloned());
            y.extend(entry.labels.iter().map(Activity::one_hot));
        }
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::windowing::LabeledWindow;

    // One recognizable single-sample "window" per (subject, index).
    fn fake_windows(tag: f64, count: usize, label: Activity) -> Vec<LabeledWindow> {
        (0..count)
            .map(|i| LabeledWindow {
                values: vec![vec![tag + i as f64]; 6],
                label,
            })
            .collect()
    }

    fn dataset() -> WindowedDataset {
        let mut data = WindowedDataset::new();
        data.extend("s1", SensorSource::Smartphone, fake_windows(100.0, 3, Activity::Walking));
        data.extend("s2", SensorSource::Smartphone, fake_windows(200.0, 2, Activity::Seated));
        data.extend("s3", SensorSource::Smartphone, fake_windows(300.0, 4, Activity::Turning));
        data
    }

    #[test]
    fn test_extend_accumulates_in_order() {
        let mut data = WindowedDataset::new();
        data.extend("s1", SensorSource::Smartwatch, fake_windows(0.0, 2, Activity::Seated));
        data.extend("s1", SensorSource::Smartwatch, fake_windows(10.0, 2, Activity::Walking));

        let entry = data.get("s1", SensorSource::Smartwatch).unwrap();
        assert_eq!(entry.windows.len(), 4);
        assert_eq!(entry.labels.len(), 4);
        assert_eq!(entry.windows[0][0][0], 0.0);
        assert_eq!(entry.windows[2][0][0], 10.0);
        assert_eq!(entry.labels[3], Activity::Walking);
    }

    #[test]
    fn test_insert_aligned_validates_lengths() {
        let mut data = WindowedDataset::new();
        let err = data
            .insert_aligned(
                "s1",
                SensorSource::Smartphone,
                vec![vec![vec![0.0]; 6]; 3],
                vec![Activity::Seated; 2],
            )
            .unwrap_err();
        assert!(matches!(err, PipelineError::DataShape(_)));
    }

    #[test]
    fn test_build_sets_counts_and_disjointness() {
        let data = dataset();
        let split = data
            .build_sets(
                SensorSource::Smartphone,
                &["s1".to_string(), "s3".to_string()],
                &["s2".to_string()],
            )
            .unwrap();

        // Per-subject counts: s1 has 3 windows, s3 has 4, s2 has 2.
        assert_eq!(split.x_train.len(), 7);
        assert_eq!(split.y_train.len(), 7);
        assert_eq!(split.x_test.len(), 2);
        assert_eq!(split.y_test.len(), 2);

        // Subject-then-temporal order; no test window appears in training.
        assert_eq!(split.x_train[0][0][0], 100.0);
        assert_eq!(split.x_train[3][0][0], 300.0);
        let train_tags: Vec<f64> = split.x_train.iter().map(|w| w[0][0]).collect();
        let test_tags: Vec<f64> = split.x_test.iter().map(|w| w[0][0]).collect();
        assert!(test_tags.iter().all(|t| !train_tags.contains(t)));
    }

    #[test]
    fn test_build_sets_one_hot_labels() {
        let data = dataset();
        let split = data
            .build_sets(SensorSource::Smartphone, &["s1".to_string()], &["s2".to_string()])
            .unwrap();
        assert_eq!(split.y_train[0], Activity::Walking.one_hot());
        assert_eq!(split.y_test[0], Activity::Seated.one_hot());
    }

    #[test]
    fn test_build_sets_missing_subject() {
        let data = dataset();
        let err = data
            .build_sets(SensorSource::Smartphone, &["s9".to_string()], &[])
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingSubject(_)));

        // Present subject, absent source.
        let err = data
            .build_sets(SensorSource::Smartwatch, &["s1".to_string()], &[])
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingSubject(_)));
    }

    #[test]
    fn test_subjects_sorted_distinct() {
        let mut data = dataset();
        data.extend("s1", SensorSource::Smartwatch, fake_windows(0.0, 1, Activity::Seated));
        assert_eq!(data.subjects(), vec!["s1", "s2", "s3"]);
    }
}
