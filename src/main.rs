//! HAR LOSO Pipeline CLI
//!
//! Windowing and leave-N-subjects-out evaluation for human-activity
//! recognition from wearable inertial sensors.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use har_loso_pipeline::{
    config::Config,
    core::SensorSource,
    dataset::WindowedDataset,
    ingest::{load_clean_dir, window_recordings},
    store,
    sweep::{Orchestrator, SweepConfig, SweepPlan},
    trainer::{ClassificationScorer, SoftmaxTrainer},
    PipelineError, VERSION,
};

#[derive(Parser)]
#[command(name = "har-pipeline")]
#[command(version = VERSION)]
#[command(about = "Windowing and LOSO evaluation sweeps for wearable HAR data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Window cleaned recordings into the per-subject windowed store
    Window {
        /// Directory of cleaned recordings (per-subject CSV files)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output directory for the windowed store
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run the leave-N-subjects-out evaluation sweep
    Sweep {
        /// Evaluate only with the specified held-out subject
        #[arg(long)]
        subject: Option<String>,

        /// Training batch size
        #[arg(long)]
        batch_size: Option<usize>,

        /// Training epochs
        #[arg(long)]
        epochs: Option<usize>,

        /// Models trained for each (test subject, group size) case
        #[arg(long)]
        splits: Option<usize>,

        /// Exercise the sweep without storing results
        #[arg(long)]
        testing: bool,
    },

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Window { input, output } => cmd_window(input, output),
        Commands::Sweep {
            subject,
            batch_size,
            epochs,
            splits,
            testing,
        } => cmd_sweep(subject, batch_size, epochs, splits, testing),
        Commands::Config => cmd_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_window(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), PipelineError> {
    let config = Config::load().unwrap_or_default();
    let input = input.unwrap_or(config.clean_dir.clone());
    let output = output.unwrap_or(config.windowed_dir.clone());

    println!("HAR LOSO Pipeline v{VERSION}");
    println!("Windowing recordings from {}", input.display());

    let recordings = load_clean_dir(&input)?;
    println!("  Recordings loaded: {}", recordings.len());

    let dataset = window_recordings(&recordings, config.window_size, config.step_size)?;
    println!(
        "  Window size: {} samples, step: {}",
        config.window_size, config.step_size
    );

    println!("  Windows per class:");
    for (class, count) in dataset.class_counts() {
        println!("    {class}: {count}");
    }

    store::save(&dataset, &output)?;
    println!("Windowed store written to {}", output.display());
    Ok(())
}

fn cmd_sweep(
    subject: Option<String>,
    batch_size: Option<usize>,
    epochs: Option<usize>,
    splits: Option<usize>,
    testing: bool,
) -> Result<(), PipelineError> {
    let config = Config::load().unwrap_or_default();
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    let batch_size = batch_size.unwrap_or(config.batch_size);
    let epochs = epochs.unwrap_or(config.epochs);
    let splits = splits.unwrap_or(config.splits);

    println!("HAR LOSO Pipeline v{VERSION}");
    println!("Loading windowed store from {}", config.windowed_dir.display());

    let mut data = WindowedDataset::new();
    for source in SensorSource::ALL {
        let per_source = store::load(&config.windowed_dir, source)?;
        for (key, entry) in per_source.iter() {
            data.insert_aligned(
                &key.subject,
                key.source,
                entry.windows.clone(),
                entry.labels.clone(),
            )?;
        }
    }
    if data.is_empty() {
        return Err(PipelineError::data_shape(format!(
            "no windowed data under {}",
            config.windowed_dir.display()
        )));
    }

    let subjects = data.subjects();
    let plan = match subject {
        Some(test_subject) => {
            if !subjects.contains(&test_subject) {
                return Err(PipelineError::missing_subject(test_subject));
            }
            SweepPlan::single_subject(subjects, test_subject, splits)
        }
        None => SweepPlan::all_subjects(subjects, splits),
    };

    println!("  Subjects: {}", plan.subjects.len());
    println!("  Held-out subjects: {}", plan.test_subjects.len());
    println!("  Splits per group size: {splits}");
    println!("  Batch size: {batch_size}, epochs: {epochs}");
    println!("  Steps to run: {}", plan.total_steps());
    if testing {
        println!("  Testing mode: results will not be stored");
    }

    let sweep_config = SweepConfig {
        batch_size,
        epochs,
        reports_dir: config.reports_dir.clone(),
        testing_mode: testing,
    };
    let mut orchestrator =
        Orchestrator::new(SoftmaxTrainer::default(), ClassificationScorer, sweep_config)?;

    let summary = orchestrator.run(&data, &plan)?;
    println!();
    println!("Sweep {} complete", summary.run_id);
    println!("  Steps completed: {}", summary.steps);
    println!("  Models trained: {}", summary.models_trained);
    if !testing {
        println!("  Reports in {}", config.reports_dir.display());
    }
    Ok(())
}

fn cmd_config() -> Result<(), PipelineError> {
    let config = Config::load().unwrap_or_default();

    println!("Configuration file: {}", Config::config_path().display());
    println!();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Could not serialize config: {e}"),
    }
    Ok(())
}
