//! Append-only sweep logs.
//!
//! Two durable outputs: the group log recording exactly which subjects
//! trained each model instance, and one report log per sensor source with
//! flattened metric rows. Both writers reopen the file for every append
//! and flush before closing, so a crash mid-sweep loses at most the
//! in-flight row; everything appended before it stays valid.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::trainer::ScoreReport;
use crate::error::PipelineError;

const GROUP_LOG_HEADER: [&str; 4] = ["test_subject", "n", "i", "train_subjects"];
const REPORT_LOG_HEADER: [&str; 6] = ["test_subject", "n", "i", "target", "metric", "value"];

/// Durable record of the subject group behind each trained model.
#[derive(Debug, Clone)]
pub struct GroupLog {
    path: PathBuf,
}

impl GroupLog {
    /// Open (or start) the group log, writing the header once if the file
    /// does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        ensure_header(&path, &GROUP_LOG_HEADER)?;
        Ok(Self { path })
    }

    /// Append one group-assignment row. The group is serialized as a JSON
    /// array of subject ids so the id list survives CSV quoting intact.
    pub fn append(
        &self,
        test_subject: &str,
        n: usize,
        i: usize,
        train_subjects: &[String],
    ) -> Result<(), PipelineError> {
        let group = serde_json::to_string(train_subjects)?;
        append_row(
            &self.path,
            &[test_subject, &n.to_string(), &i.to_string(), &group],
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Per-source log of flattened metric rows.
#[derive(Debug, Clone)]
pub struct ReportLog {
    path: PathBuf,
}

impl ReportLog {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        ensure_header(&path, &REPORT_LOG_HEADER)?;
        Ok(Self { path })
    }

    /// Flatten one score report into `target,metric,value` rows and append
    /// them. Per-target metric sets become four rows each; model-level
    /// scalars land under the literal target `model`.
    pub fn append_report(
        &self,
        test_subject: &str,
        n: usize,
        i: usize,
        report: &ScoreReport,
    ) -> Result<(), PipelineError> {
        for (target, metrics) in &report.targets {
            for (metric, value) in [
                ("precision", metrics.precision),
                ("recall", metrics.recall),
                ("f1-score", metrics.f1_score),
                ("support", metrics.support),
            ] {
                self.append_value(test_subject, n, i, target, metric, value)?;
            }
        }
        for (metric, value) in &report.model {
            self.append_value(test_subject, n, i, "model", metric, *value)?;
        }
        Ok(())
    }

    fn append_value(
        &self,
        test_subject: &str,
        n: usize,
        i: usize,
        target: &str,
        metric: &str,
        value: f64,
    ) -> Result<(), PipelineError> {
        append_row(
            &self.path,
            &[
                test_subject,
                &n.to_string(),
                &i.to_string(),
                target,
                metric,
                &value.to_string(),
            ],
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ensure_header(path: &Path, header: &[&str]) -> Result<(), PipelineError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create_new(true).write(true).open(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(header)?;
    writer.flush().map_err(PipelineError::from)?;
    Ok(())
}

// Scoped acquisition: open, append one record, flush, close.
fn append_row(path: &Path, fields: &[&str]) -> Result<(), PipelineError> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(fields)?;
    writer.flush().map_err(PipelineError::from)?;
    Ok(())
}
