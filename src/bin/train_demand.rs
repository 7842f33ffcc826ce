//! Demand forecast trainer
//!
//! Reads a CSV with columns `ts, zone_id, trips` and saves the mean trip count
//! per (zone, hour-of-week) bucket as a demand artifact.
//!
//! Usage: train-demand --input demand.csv --output /models/demand_forecast.json

use clap::Parser;
use ride_ml_inference::config::LoggingSettings;
use ride_ml_inference::logging::init_logging;
use ride_ml_inference::services::ArtifactStore;
use ride_ml_inference::training::{read_demand_records, train_demand, TrainingError};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "train-demand")]
#[command(about = "Train the zone/hour-of-week demand model", long_about = None)]
struct Cli {
    /// Path to demand CSV
    #[arg(long)]
    input: PathBuf,

    /// Path to save the model artifact
    #[arg(long)]
    output: PathBuf,

    /// Log format: json or pretty
    #[arg(long, default_value = "pretty")]
    log_format: String,
}

fn run(cli: &Cli) -> Result<(), TrainingError> {
    let file = File::open(&cli.input)?;
    let records = read_demand_records(BufReader::new(file))?;
    tracing::info!("Read {} demand records from {}", records.len(), cli.input.display());

    let model = train_demand(&records)?;
    ArtifactStore::save(&cli.output, &model)?;

    tracing::info!("Saved demand model to {}", cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&LoggingSettings {
        format: cli.log_format.clone(),
        ..Default::default()
    });

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Demand training failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
