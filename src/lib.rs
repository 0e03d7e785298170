//! HAR LOSO Pipeline - windowing and leave-N-subjects-out evaluation for
//! human-activity recognition from wearable inertial sensors.
//!
//! Cleaned 6-channel recordings (3-axis acceleration, 3-axis angular
//! velocity) are sliced into fixed-size overlapping windows with majority
//! activity labels, stored per subject and sensor source, and fed into an
//! evaluation sweep that repeatedly trains a classifier over random
//! subject subsets while holding one subject out. Every trained model's
//! subject group and metrics are appended to durable logs.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                       HAR LOSO Pipeline                        │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────┐   ┌───────────────────────┐      │
//! │  │  Ingest  │──▶│ Windower  │──▶│ Windowed store (disk) │      │
//! │  │  (CSV)   │   │ (50/25)   │   └───────────┬───────────┘      │
//! │  └──────────┘   └───────────┘               │                  │
//! │                                             ▼                  │
//! │  ┌───────────┐   ┌──────────────┐   ┌──────────────┐           │
//! │  │ Group     │──▶│ Orchestrator │──▶│ Trainer /    │           │
//! │  │ generator │   │ (sweep)      │   │ Scorer seams │           │
//! │  └───────────┘   └──────┬───────┘   └──────────────┘           │
//! │                         ▼                                      │
//! │              ┌─────────────────────┐                           │
//! │              │ Group + report logs │                           │
//! │              │ (append-only CSV)   │                           │
//! │              └─────────────────────┘                           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use har_loso_pipeline::{
//!     sweep::{Orchestrator, SweepConfig, SweepPlan},
//!     trainer::{ClassificationScorer, SoftmaxTrainer},
//! };
//!
//! let data = har_loso_pipeline::store::load(
//!     std::path::Path::new("03_WINDOWED"),
//!     har_loso_pipeline::core::SensorSource::Smartphone,
//! ).expect("windowed store");
//!
//! let plan = SweepPlan::all_subjects(data.subjects(), 10);
//! let config = SweepConfig {
//!     batch_size: 20,
//!     epochs: 50,
//!     reports_dir: "model-reports".into(),
//!     testing_mode: false,
//! };
//! let mut orchestrator =
//!     Orchestrator::new(SoftmaxTrainer::default(), ClassificationScorer, config)
//!         .expect("reports dir");
//! let summary = orchestrator.run(&data, &plan).expect("sweep");
//! println!("trained {} models", summary.models_trained);
//! ```

pub mod config;
pub mod core;
pub mod dataset;
pub mod error;
pub mod ingest;
pub mod report;
pub mod store;
pub mod sweep;
pub mod trainer;

// Re-export key types at crate root for convenience
pub use config::Config;
pub use core::{Activity, LabeledWindow, Recording, Sample, SensorSource, WindowTensor};
pub use dataset::{TrainTestSplit, WindowedDataset};
pub use error::PipelineError;
pub use report::{GroupLog, ReportLog};
pub use sweep::{Orchestrator, SweepConfig, SweepPlan, SweepStep, SweepSummary};
pub use trainer::{ClassificationScorer, Model, Scorer, SoftmaxTrainer, Trainer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
