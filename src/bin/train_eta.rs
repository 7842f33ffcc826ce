//! ETA calibration trainer
//!
//! Reads a CSV with columns `pickup_ts, osrm_duration, actual_duration` and
//! fits actual duration on `[osrm_duration, hour, dow]` by least squares.
//!
//! Usage: train-eta --input trips.csv --output /models/eta_calibration.json

use clap::Parser;
use ride_ml_inference::config::LoggingSettings;
use ride_ml_inference::logging::init_logging;
use ride_ml_inference::services::ArtifactStore;
use ride_ml_inference::training::{read_trip_records, train_eta, TrainingError};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "train-eta")]
#[command(about = "Train the ETA calibration model", long_about = None)]
struct Cli {
    /// Path to trips CSV
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
    let records = read_trip_records(BufReader::new(file))?;
    tracing::info!("Read {} trips from {}", records.len(), cli.input.display());

    let model = train_eta(&records)?;
    ArtifactStore::save(&cli.output, &model)?;

    tracing::info!("Saved ETA calibration model to {}", cli.output.display());
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
            tracing::error!("ETA training failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
