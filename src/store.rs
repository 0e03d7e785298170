//! On-disk layout of the windowed store.
//!
//! One directory per subject, holding one window-tensor file and one
//! parallel ground-truth file per sensor source:
//!
//! ```text
//! 03_WINDOWED/
//!   s1/
//!     s1_sp.json      # array of 6 x window_size matrices
//!     s1_sp_gt.json   # parallel array of integer-encoded labels
//!     s1_sw.json
//!     s1_sw_gt.json
//!   s2/
//!     ...
//! ```
//!
//! Subject directories are recognised by their `s` prefix and loaded in
//! sorted order, so a loaded dataset iterates the same way it was written.

use std::fs;
use std::path::Path;

use crate::core::activity::Activity;
use crate::core::recording::SensorSource;
use crate::core::windowing::WindowTensor;
use crate::dataset::WindowedDataset;
use crate::error::PipelineError;

/// Write the whole dataset under `dir`, one subject directory at a time.
pub fn save(dataset: &WindowedDataset, dir: &Path) -> Result<(), PipelineError> {
    for (key, entry) in dataset.iter() {
        let subject_dir = dir.join(&key.subject);
        fs::create_dir_all(&subject_dir)?;

        let stem = format!("{}_{}", key.subject, key.source);
        let tensors = serde_json::to_string(&entry.windows)?;
        fs::write(subject_dir.join(format!("{stem}.json")), tensors)?;

        let labels: Vec<usize> = entry.labels.iter().map(Activity::index).collect();
        let gt = serde_json::to_string(&labels)?;
        fs::write(subject_dir.join(format!("{stem}_gt.json")), gt)?;
    }
    Ok(())
}

/// Load every subject's windows for one sensor source.
pub fn load(dir: &Path, source: SensorSource) -> Result<WindowedDataset, PipelineError> {
    let mut dataset = WindowedDataset::new();
    for subject in list_subject_dirs(dir)? {
        let stem = dir.join(&subject).join(format!("{subject}_{source}"));
        let tensor_path = stem.with_extension("json");
        let gt_path = dir
            .join(&subject)
            .join(format!("{subject}_{source}_gt.json"));
        if !tensor_path.exists() {
            continue;
        }

        let windows: Vec<WindowTensor> = serde_json::from_str(&fs::read_to_string(&tensor_path)?)?;
        let raw_labels: Vec<usize> = serde_json::from_str(&fs::read_to_string(&gt_path)?)?;
        let labels = raw_labels
            .iter()
            .map(|&i| {
                Activity::from_index(i).ok_or_else(|| {
                    PipelineError::parse(format!(
                        "{}: unknown activity index {i}",
                        gt_path.display()
                    ))
                })
            })
            .collect::<Result<Vec<Activity>, PipelineError>>()?;

        dataset.insert_aligned(&subject, source, windows, labels)?;
    }
    Ok(dataset)
}

/// Subject directories under `dir` (names starting with `s`), sorted.
pub fn list_subject_dirs(dir: &Path) -> Result<Vec<String>, PipelineError> {
    let mut subjects = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.file_type()?.is_dir() && name.starts_with('s') {
            subjects.push(name);
        }
    }
    subjects.sort();
    Ok(subjects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::windowing::LabeledWindow;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("har-store-test-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_dataset() -> WindowedDataset {
        let mut data = WindowedDataset::new();
        data.extend(
            "s1",
            SensorSource::Smartphone,
            vec![
                LabeledWindow {
                    values: vec![vec![1.0, 2.0]; 6],
                    label: Activity::Walking,
                },
                LabeledWindow {
                    values: vec![vec![3.0, 4.0]; 6],
                    label: Activity::Seated,
                },
            ],
        );
        data.extend(
            "s2",
            SensorSource::Smartphone,
            vec![LabeledWindow {
                values: vec![vec![5.0, 6.0]; 6],
                label: Activity::Turning,
            }],
        );
        data
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = temp_dir();
        let data = sample_dataset();
        save(&data, &dir).unwrap();

        assert!(dir.join("s1").join("s1_sp.json").exists());
        assert!(dir.join("s1").join("s1_sp_gt.json").exists());

        let loaded = load(&dir, SensorSource::Smartphone).unwrap();
        assert_eq!(loaded.subjects(), vec!["s1", "s2"]);
        let entry = loaded.get("s1", SensorSource::Smartphone).unwrap();
        assert_eq!(entry.windows.len(), 2);
        assert_eq!(entry.windows[0][0], vec![1.0, 2.0]);
        assert_eq!(entry.labels, vec![Activity::Walking, Activity::Seated]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_skips_missing_source() {
        let dir = temp_dir();
        save(&sample_dataset(), &dir).unwrap();

        let loaded = load(&dir, SensorSource::Smartwatch).unwrap();
        assert!(loaded.is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_list_subject_dirs_filters_and_sorts() {
        let dir = temp_dir();
        for name in ["s2", "s10", "s1", "notes"] {
            fs::create_dir_all(dir.join(name)).unwrap();
        }
        fs::write(dir.join("stray.txt"), "x").unwrap();

        // Lexicographic sort, matching the original store enumeration.
        assert_eq!(list_subject_dirs(&dir).unwrap(), vec!["s1", "s10", "s2"]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
