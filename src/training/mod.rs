//! Offline trainers producing artifacts for the inference service
//!
//! Both trainers are single-pass batch jobs: read a CSV, fit, save. Bad input
//! data is always fatal; there is no fallback for producing an artifact.

pub mod demand;
pub mod eta;
pub mod records;

pub use demand::train_demand;
pub use eta::train_eta;
pub use records::{read_demand_records, read_trip_records, DemandRecord, TripRecord};

use crate::core::RegressionError;
use crate::services::StoreError;
use thiserror::Error;

/// Errors that abort a training run
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column {0}")]
    MissingColumn(&'static str),

    #[error("Malformed timestamp {value:?} in column {column} at row {row}")]
    Timestamp {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Invalid {column} value {value} at row {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: f64,
    },

    #[error("Training input contains no records")]
    EmptyDataset,

    #[error("Trained model is invalid: {0}")]
    InvalidModel(String),

    #[error("Regression failed: {0}")]
    Regression(#[from] RegressionError),

    #[error("Failed to save artifact: {0}")]
    Store(#[from] StoreError),
}
