//! Trainer and scorer seams for the evaluation sweep.
//!
//! The sweep only needs two capabilities from the learning side: fit a
//! model on window tensors and one-hot labels, and score predictions
//! against ground truth. Both are traits so the convolutional trainer of
//! the research setup can live outside this crate; a linear softmax
//! baseline and a classification scorer are provided for the CLI and for
//! exercising the sweep end to end.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::core::activity::CLASS_COUNT;
use crate::core::windowing::WindowTensor;
use crate::error::PipelineError;

/// A fitted classifier.
pub trait Model {
    /// Predict one-hot-probability rows, one per input window.
    fn predict(&self, x: &[WindowTensor]) -> Vec<Vec<f64>>;
}

/// Fits a model on window tensors and one-hot labels.
pub trait Trainer {
    type Model: Model;

    /// Train a fresh model and return it with the elapsed wall time in
    /// seconds.
    fn train(
        &mut self,
        x: &[WindowTensor],
        y: &[Vec<f64>],
        batch_size: usize,
        epochs: usize,
    ) -> Result<(Self::Model, f64), PipelineError>;
}

/// Per-class metrics in the scorer output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: f64,
}

/// Scorer output: per-target metric sets plus scalar model-level metrics.
///
/// `targets` holds one entry per class name and the `macro avg` /
/// `weighted avg` aggregates; `model` holds scalars such as `accuracy` and,
/// merged in by the orchestrator, `training time`.
#[derive(Debug, Clone, Default)]
pub struct ScoreReport {
    pub targets: BTreeMap<String, ClassMetrics>,
    pub model: BTreeMap<String, f64>,
}

/// Scores predictions against ground truth.
pub trait Scorer {
    fn score(&self, y_true: &[Vec<f64>], y_pred: &[Vec<f64>], class_names: &[&str]) -> ScoreReport;
}

fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = i;
        }
    }
    best
}

/// Linear softmax classifier over flattened window tensors.
#[derive(Debug, Clone)]
pub struct SoftmaxModel {
    /// Per-class weight rows, one bias term appended to each.
    weights: Vec<Vec<f64>>,
}

impl SoftmaxModel {
    fn logits(&self, features: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .map(|row| {
                let dot: f64 = row[..features.len()]
                    .iter()
                    .zip(features)
                    .map(|(w, x)| w * x)
                    .sum();
                dot + row[features.len()]
            })
            .collect()
    }
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

fn flatten(window: &WindowTensor) -> Vec<f64> {
    window.iter().flat_map(|row| row.iter().copied()).collect()
}

impl Model for SoftmaxModel {
    fn predict(&self, x: &[WindowTensor]) -> Vec<Vec<f64>> {
        x.iter()
            .map(|window| softmax(&self.logits(&flatten(window))))
            .collect()
    }
}

/// Baseline trainer: multinomial logistic regression fitted with SGD.
///
/// Stands in for the external convolutional trainer; honors the same
/// batch_size/epochs surface so sweep timings remain comparable in shape.
#[derive(Debug, Clone)]
pub struct SoftmaxTrainer {
    pub learning_rate: f64,
}

impl Default for SoftmaxTrainer {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
        }
    }
}

impl Trainer for SoftmaxTrainer {
    type Model = SoftmaxModel;

    fn train(
        &mut self,
        x: &[WindowTensor],
        y: &[Vec<f64>],
        batch_size: usize,
        epochs: usize,
    ) -> Result<(SoftmaxModel, f64), PipelineError> {
        if x.is_empty() {
            return Err(PipelineError::trainer("empty training set"));
        }
        if x.len() != y.len() {
            return Err(PipelineError::trainer(format!(
                "{} windows but {} label rows",
                x.len(),
                y.len()
            )));
        }
        if batch_size == 0 || epochs == 0 {
            return Err(PipelineError::trainer(
                "batch_size and epochs must be > 0",
            ));
        }

        let started = Instant::now();
        let features: Vec<Vec<f64>> = x.iter().map(flatten).collect();
        let dim = features[0].len();
        if features.iter().any(|f| f.len() != dim) {
            return Err(PipelineError::trainer("inconsistent window shapes"));
        }

        let mut model = SoftmaxModel {
            weights: vec![vec![0.0; dim + 1]; CLASS_COUNT],
        };

        for _ in 0..epochs {
            for batch in features.chunks(batch_size).zip(y.chunks(batch_size)) {
                let (xs, ys) = batch;
                for (feature, target) in xs.iter().zip(ys) {
                    let probs = softmax(&model.logits(feature));
                    for class in 0..CLASS_COUNT {
                        let gradient = probs[class] - target[class];
                        let row = &mut model.weights[class];
                        for (w, value) in row[..dim].iter_mut().zip(feature) {
                            *w -= self.learning_rate * gradient * value;
                        }
                        row[dim] -= self.learning_rate * gradient;
                    }
                }
            }
        }

        Ok((model, started.elapsed().as_secs_f64()))
    }
}

/// Per-class precision/recall/F1 with macro and weighted aggregates.
///
/// Matches the usual classification-report conventions: a class with no
/// predicted (or no true) instances scores 0 rather than dividing by zero,
/// and `accuracy` is reported as a model-level scalar.
#[derive(Debug, Clone, Default)]
pub struct ClassificationScorer;

impl Scorer for ClassificationScorer {
    fn score(&self, y_true: &[Vec<f64>], y_pred: &[Vec<f64>], class_names: &[&str]) -> ScoreReport {
        let classes = class_names.len();
        let mut true_counts = vec![0usize; classes];
        let mut pred_counts = vec![0usize; classes];
        let mut hit_counts = vec![0usize; classes];

        for (truth, pred) in y_true.iter().zip(y_pred) {
            let t = argmax(truth);
            let p = argmax(pred);
            true_counts[t] += 1;
            pred_counts[p] += 1;
            if t == p {
                hit_counts[t] += 1;
            }
        }

        let total = y_true.len();
        let mut report = ScoreReport::default();
        let mut macro_sum = ClassMetrics {
            precision: 0.0,
            recall: 0.0,
            f1_score: 0.0,
            support: total as f64,
        };
        let mut weighted_sum = macro_sum;

        for (class, name) in class_names.iter().enumerate() {
            let precision = ratio(hit_counts[class], pred_counts[class]);
            let recall = ratio(hit_counts[class], true_counts[class]);
            let f1_score = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            let support = true_counts[class] as f64;

            macro_sum.precision += precision / classes as f64;
            macro_sum.recall += recall / classes as f64;
            macro_sum.f1_score += f1_score / classes as f64;
            if total > 0 {
                let weight = support / total as f64;
                weighted_sum.precision += precision * weight;
                weighted_sum.recall += recall * weight;
                weighted_sum.f1_score += f1_score * weight;
            }

            report.targets.insert(
                name.to_string(),
                ClassMetrics {
                    precision,
                    recall,
                    f1_score,
                    support,
                },
            );
        }

        report.targets.insert("macro avg".to_string(), macro_sum);
        report
            .targets
            .insert("weighted avg".to_string(), weighted_sum);
        report.model.insert(
            "accuracy".to_string(),
            ratio(hit_counts.iter().sum(), total),
        );

        report
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::activity::Activity;

    fn constant_window(value: f64) -> WindowTensor {
        vec![vec![value; 4]; 6]
    }

    #[test]
    fn test_softmax_trainer_separates_constant_classes() {
        let x: Vec<WindowTensor> = (0..20)
            .map(|i| constant_window(if i % 2 == 0 { -1.0 } else { 1.0 }))
            .collect();
        let y: Vec<Vec<f64>> = (0..20)
            .map(|i| {
                if i % 2 == 0 {
                    Activity::Seated.one_hot()
                } else {
                    Activity::Walking.one_hot()
                }
            })
            .collect();

        let mut trainer = SoftmaxTrainer::default();
        let (model, elapsed) = trainer.train(&x, &y, 4, 50).unwrap();
        assert!(elapsed >= 0.0);

        let preds = model.predict(&[constant_window(-1.0), constant_window(1.0)]);
        assert_eq!(argmax(&preds[0]), Activity::Seated.index());
        assert_eq!(argmax(&preds[1]), Activity::Walking.index());
        // Rows are probability distributions.
        for row in &preds {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_trainer_rejects_bad_input() {
        let mut trainer = SoftmaxTrainer::default();
        assert!(trainer.train(&[], &[], 4, 10).is_err());

        let x = vec![constant_window(0.0)];
        assert!(trainer.train(&x, &[], 4, 10).is_err());
        assert!(trainer
            .train(&x, &[Activity::Seated.one_hot()], 0, 10)
            .is_err());
    }

    #[test]
    fn test_scorer_perfect_predictions() {
        let y: Vec<Vec<f64>> = vec![
            Activity::Seated.one_hot(),
            Activity::Walking.one_hot(),
            Activity::Walking.one_hot(),
        ];
        let report = ClassificationScorer.score(&y, &y, &crate::core::activity::class_names());

        assert_eq!(report.model["accuracy"], 1.0);
        let walking = &report.targets["WALKING"];
        assert_eq!(walking.precision, 1.0);
        assert_eq!(walking.recall, 1.0);
        assert_eq!(walking.f1_score, 1.0);
        assert_eq!(walking.support, 2.0);
        // Absent class: zero, not a division error.
        assert_eq!(report.targets["TURNING"].f1_score, 0.0);
    }

    #[test]
    fn test_scorer_partial_predictions() {
        let y_true = vec![
            Activity::Seated.one_hot(),
            Activity::Seated.one_hot(),
            Activity::Walking.one_hot(),
            Activity::Walking.one_hot(),
        ];
        let y_pred = vec![
            Activity::Seated.one_hot(),
            Activity::Walking.one_hot(),
            Activity::Walking.one_hot(),
            Activity::Walking.one_hot(),
        ];
        let report =
            ClassificationScorer.score(&y_true, &y_pred, &crate::core::activity::class_names());

        assert_eq!(report.model["accuracy"], 0.75);
        let seated = &report.targets["SEATED"];
        assert_eq!(seated.precision, 1.0);
        assert_eq!(seated.recall, 0.5);
        let walking = &report.targets["WALKING"];
        assert!((walking.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(walking.recall, 1.0);

        let weighted = &report.targets["weighted avg"];
        assert_eq!(weighted.support, 4.0);
        assert!(weighted.recall > 0.0);
    }

    #[test]
    fn test_report_target_order_is_deterministic() {
        let y = vec![Activity::Seated.one_hot()];
        let names = crate::core::activity::class_names();
        let first: Vec<String> = ClassificationScorer
            .score(&y, &y, &names)
            .targets
            .keys()
            .cloned()
            .collect();
        let second: Vec<String> = ClassificationScorer
            .score(&y, &y, &names)
            .targets
            .keys()
            .cloned()
            .collect();
        assert_eq!(first, second);
    }
}
