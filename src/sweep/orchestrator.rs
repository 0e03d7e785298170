//! Evaluation-sweep orchestrator.
//!
//! Drives the leave-N-subjects-out sweep: for each plan step, draw one
//! training group, log it, then for each sensor source build the
//! train/test sets, train, score, and append the flattened metrics to
//! that source's report log. The orchestrator owns every writer handle and
//! the trainer configuration; there is no global state, and nothing
//! persists in testing mode.

use std::collections::BTreeMap;
use std::path::PathBuf;

use uuid::Uuid;

use crate::core::activity::class_names;
use crate::core::grouping::generate_group;
use crate::core::recording::SensorSource;
use crate::dataset::WindowedDataset;
use crate::error::PipelineError;
use crate::report::{GroupLog, ReportLog};
use crate::sweep::plan::SweepPlan;
use crate::trainer::{Model, Scorer, Trainer};

/// Orchestrator settings, fixed for the duration of one sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub batch_size: usize,
    pub epochs: usize,
    /// Directory for the group log and the per-source report logs.
    pub reports_dir: PathBuf,
    /// Exercise the full loop without persisting anything.
    pub testing_mode: bool,
}

/// Outcome of a completed sweep.
#[derive(Debug, Clone)]
pub struct SweepSummary {
    /// Provenance tag for this run.
    pub run_id: Uuid,
    /// Plan steps completed.
    pub steps: usize,
    /// Models trained (steps x sensor sources).
    pub models_trained: usize,
}

/// Owns the sweep's collaborators and writer handles.
pub struct Orchestrator<T: Trainer, S: Scorer> {
    trainer: T,
    scorer: S,
    config: SweepConfig,
    group_log: Option<GroupLog>,
    report_logs: BTreeMap<SensorSource, ReportLog>,
}

impl<T: Trainer, S: Scorer> Orchestrator<T, S> {
    /// Create an orchestrator, opening the group log up front so a bad
    /// reports directory fails before any training happens.
    pub fn new(trainer: T, scorer: S, config: SweepConfig) -> Result<Self, PipelineError> {
        let group_log = if config.testing_mode {
            None
        } else {
            Some(GroupLog::open(config.reports_dir.join("loso_groups.csv"))?)
        };
        Ok(Self {
            trainer,
            scorer,
            config,
            group_log,
            report_logs: BTreeMap::new(),
        })
    }

    /// Run the whole sweep over `data`.
    ///
    /// One group per `(test_subject, n, i)` step, shared across sensor
    /// sources so source comparisons see identical training subjects. Any
    /// error aborts the sweep; rows already appended remain valid.
    pub fn run(
        &mut self,
        data: &WindowedDataset,
        plan: &SweepPlan,
    ) -> Result<SweepSummary, PipelineError> {
        let sources = data.sources();
        if sources.is_empty() {
            return Err(PipelineError::data_shape("windowed dataset is empty"));
        }

        let mut summary = SweepSummary {
            run_id: Uuid::new_v4(),
            steps: 0,
            models_trained: 0,
        };

        for step in plan.steps() {
            let group = generate_group(&plan.subjects, step.n, &step.test_subject)?;
            if let Some(log) = &self.group_log {
                log.append(&step.test_subject, step.n, step.i, &group)?;
            }

            let test_subjects = [step.test_subject.clone()];
            for source in &sources {
                let split = data.build_sets(*source, &group, &test_subjects)?;
                let (model, training_time) = self.trainer.train(
                    &split.x_train,
                    &split.y_train,
                    self.config.batch_size,
                    self.config.epochs,
                )?;
                let y_pred = model.predict(&split.x_test);

                let mut report = self.scorer.score(&split.y_test, &y_pred, &class_names());
                report
                    .model
                    .insert("training time".to_string(), training_time);

                if !self.config.testing_mode {
                    let log = self.report_log(*source)?;
                    log.append_report(&step.test_subject, step.n, step.i, &report)?;
                }
                summary.models_trained += 1;

                // Keep peak memory bounded by one iteration's working set.
                drop(model);
                drop(split);
            }
            summary.steps += 1;
        }

        Ok(summary)
    }

    // Report logs open lazily, one per source on first use.
    fn report_log(&mut self, source: SensorSource) -> Result<&ReportLog, PipelineError> {
        if !self.report_logs.contains_key(&source) {
            let path = self.config.reports_dir.join(format!("{source}_models.csv"));
            self.report_logs.insert(source, ReportLog::open(path)?);
        }
        Ok(&self.report_logs[&source])
    }
}
