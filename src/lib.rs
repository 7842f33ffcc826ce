//! Ride ML Inference - prediction service with rule-based fallbacks
//!
//! This library serves ETA calibration, demand forecasts, match scores and
//! fraud risk. Each model-backed endpoint uses a trained artifact when one
//! was loaded at startup and a deterministic fallback otherwise. The
//! `training` module builds the demand and ETA artifacts from CSV history.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod training;

// Re-export commonly used types
pub use crate::core::{calibrate_eta, forecast_demand, fraud_risk, score_match};
pub use models::{DemandModel, EtaCalibrationModel, LogisticMatchModel, ModelStatus};
pub use services::{ArtifactStore, ModelRegistry};
